//! 출력 형식과 에러 안내

use helpme_client::Outcome;
use helpme_core::ErrorKind;
use serde::Serialize;

/// 출력 형식
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 세션 변경으로 버려진 결과면 안내 후 `None`
pub fn applied<T>(outcome: Outcome<T>) -> Option<T> {
    let value = outcome.applied();
    if value.is_none() {
        eprintln!("Session changed while the request was in flight; result discarded.");
    }
    value
}

/// 에러 종류별 안내 메시지 (stderr)
pub fn report_error(err: &anyhow::Error) {
    let Some(err) = err.downcast_ref::<helpme_core::Error>() else {
        return;
    };

    match (err.kind(), err) {
        (ErrorKind::Validation, helpme_core::Error::Validation(fields)) => {
            for (field, message) in fields.iter() {
                eprintln!("  {}: {}", field, message);
            }
        }
        (ErrorKind::Authorization, helpme_core::Error::Unauthorized { .. }) => {
            eprintln!("Your session was cleared by the server. Run 'hm login' to sign in again.");
        }
        (ErrorKind::Authorization, helpme_core::Error::NotAuthorized { .. }) => {
            eprintln!("This command requires an administrator. Run 'hm whoami' to check your session.");
        }
        (ErrorKind::Transient, _) => {
            eprintln!("The request did not complete ({}). Try again later.", err.code());
        }
        _ => {}
    }
}
