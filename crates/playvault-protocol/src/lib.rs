//! Shared types for Playvault: addresses, slots, and wire DTOs.
//!
//! This crate defines the "language" the rest of the backend speaks:
//!
//! - **Addressing** ([`AccountAddress`], [`SessionToken`]) — how an
//!   external identity or bearer token is turned into the key of exactly
//!   one actor.
//! - **Slots** ([`SlotId`], [`SlotRecord`], [`SaveSlots`]) — the fixed
//!   three-slot save registry every account carries.
//! - **Wire DTOs** ([`SignupRequest`], [`LoginResponse`],
//!   [`ProfileSnapshot`], etc.) — the JSON bodies of the HTTP surface.
//!
//! # Architecture
//!
//! The protocol layer sits below everything else. It knows nothing about
//! actors, storage, or sessions — it only defines the shapes that travel
//! between them.
//!
//! ```text
//! Gateway / Coordinator (orchestration)
//!     ↕
//! Account / Session actors (state owners)
//!     ↕
//! Protocol (this crate: addresses + documents + DTOs)
//! ```

mod address;
mod error;
mod slots;
mod wire;

pub use address::{AccountAddress, SessionToken};
pub use error::ProtocolError;
pub use slots::{SaveSlots, SlotId, SlotRecord};
pub use wire::{
    ErrorResponse, LoginRequest, LoginResponse, OkResponse, ProfileSnapshot,
    SaveSlotRequest, SignupRequest, SignupResponse, SlotRequest,
    VerifyResponse, PROFILE_KEYS,
};
