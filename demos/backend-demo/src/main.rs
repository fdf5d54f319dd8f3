//! A scripted walk through the backend: signup, verification, login,
//! profile sync, game data, and save slots — against an in-memory store
//! with a mailer that prints instead of sending.
//!
//! Run with `cargo run -p backend-demo` (add `RUST_LOG=debug` for the
//! actor-level log lines).

use serde_json::{json, Map};

use playvault::protocol::{
    LoginRequest, SaveSlotRequest, SignupRequest, SlotId,
};
use playvault::{
    Backend, Mailer, MailerError, MemoryStore, PlayvaultError, SystemClock,
    VerificationMail,
};

/// "Sends" a verification mail by printing the link a real mailer would
/// embed.
#[derive(Clone)]
struct ConsoleMailer;

impl Mailer for ConsoleMailer {
    async fn send_verification(
        &self,
        mail: VerificationMail,
    ) -> Result<(), MailerError> {
        println!(
            "  [mail to {}] Hi {}, verify at /api/verify?email={}&token={}",
            mail.email, mail.username, mail.email, mail.token
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), PlayvaultError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let backend =
        Backend::<MemoryStore, SystemClock, ConsoleMailer>::builder()
            .build(MemoryStore::new(), SystemClock, ConsoleMailer);

    println!("== signup ==");
    let signup = backend
        .signup(SignupRequest {
            email: "alice@example.com".into(),
            password: "hunter2".into(),
            username: "alice".into(),
        })
        .await?;
    println!("  user: {}  session: {}", signup.user_id, signup.session_id);

    println!("== login (second session) ==");
    let login = backend
        .login(LoginRequest {
            email: "alice@example.com".into(),
            password: "hunter2".into(),
        })
        .await?;
    let token = login.session_id.clone();
    println!("  session: {token}");

    println!("== profile sync ==");
    let mut fields = Map::new();
    fields.insert("points".into(), json!(150));
    fields.insert("achievements".into(), json!({"first_win": true}));
    backend.sync_profile(&token, fields).await?;
    let snap = backend.profile(&token).await?;
    println!("  points now: {}", snap.profile["points"]);

    println!("== chess game data ==");
    let mut doc = Map::new();
    doc.insert("points".into(), json!(75));
    backend.update_game_data(&token, "chess", doc).await?;
    let chess = backend.game_data(&token, "chess").await?;
    println!(
        "  chess points: {}, board style: {}",
        chess["points"], chess["settings"]["boardStyle"]
    );

    println!("== dungeon save slots ==");
    backend
        .save_slot(
            &token,
            SaveSlotRequest {
                slot: SlotId::Slot1,
                data: json!({"floor": 3, "hp": 42}),
                name: None,
            },
        )
        .await?;
    let slots = backend.list_slots(&token).await?;
    println!("  last played: {:?}", slots.last_played_slot);
    if let Some(slot) = backend.load_slot(&token, SlotId::Slot1).await? {
        println!("  slot1 \"{}\": {}", slot.name, slot.data);
    }

    println!("== logout ==");
    backend.logout(&token).await?;
    match backend.profile(&token).await {
        Err(e) => println!("  profile after logout: {} ({})", e, e.status()),
        Ok(_) => println!("  unexpected: session still live"),
    }

    Ok(())
}
