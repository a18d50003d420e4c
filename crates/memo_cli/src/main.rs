//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `memo_core` linkage and print deterministic probe output.
//! - Optionally open a database file and report how many memos it holds.
//!
//! Usage: `memo_cli [DB_PATH] [LOG_DIR]`

use memo_core::{
    init_logging_from_config, with_db, CoreConfig, MemoRepository, SqliteMemoRepository,
    StorageLocator, StoreError,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("memo_core ping={}", memo_core::ping());
    println!("memo_core version={}", memo_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(db_path) = args.next() else {
        return ExitCode::SUCCESS;
    };

    let mut config = CoreConfig::new(StorageLocator::file(&db_path));
    if let Some(log_dir) = args.next() {
        config = config.with_log_dir(log_dir);
    }
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let counted = with_db(&config.storage, |conn| -> Result<usize, StoreError> {
        let repo = SqliteMemoRepository::try_new(conn)?;
        Ok(repo.list_all()?.len())
    });
    match counted {
        Ok(count) => {
            log::info!("event=cli_probe module=cli status=ok memo_count={count}");
            println!("memo_core db={db_path} memos={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!(
                "event=cli_probe module=cli status=error error_code={}",
                err.code()
            );
            eprintln!("memo_core db={db_path} error={err}");
            ExitCode::FAILURE
        }
    }
}
