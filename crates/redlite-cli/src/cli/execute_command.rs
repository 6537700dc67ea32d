use std::io::Write;
use std::ops::ControlFlow;

use redlite::{Db, Result, StoreConfig};
use tracing::debug;

use crate::cli::{Cli, Commands};

/// Executes one CLI command against the database at `cli.path`.
///
/// Each invocation opens the database, runs exactly one operation on the
/// selected bucket, writes the result to `out` and closes the database.
/// Missing strings and empty pops print nothing.
pub fn execute_command<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let config = StoreConfig {
        read_only: cli.read_only,
        ..StoreConfig::default()
    };
    let db = Db::open_with_config(&cli.path, config)?;
    debug!(command = ?cli.command, "Executing");

    let outcome = run(&db, cli, out);
    db.close()?;
    outcome
}

fn run<W: Write>(db: &Db, cli: &Cli, out: &mut W) -> Result<()> {
    let bucket = db.bucket(&cli.bucket)?;

    match &cli.command {
        Commands::Get { key } => {
            if let Some(value) = bucket.get(key)? {
                write_value(out, &value)?;
            }
        }
        Commands::Set { key, value } => {
            bucket.set(key, value)?;
            writeln!(out, "OK")?;
        }
        Commands::Type { key } => {
            writeln!(out, "{}", bucket.type_of(key)?)?;
        }
        Commands::Del { key } => {
            writeln!(out, "{}", u8::from(bucket.delete(key)?))?;
        }
        Commands::Len { key } => {
            writeln!(out, "{}", bucket.list(key)?.len()?)?;
        }
        Commands::Index { key, position } => {
            if let Some(value) = bucket.list(key)?.index(*position)? {
                write_value(out, &value)?;
            }
        }
        Commands::Range { key, start, stop } => {
            let mut failure = None;
            bucket.list(key)?.range(*start, *stop, |offset, value| {
                let line = write!(out, "{}\t", offset).and_then(|()| write_value(out, value));
                match line {
                    Ok(()) => ControlFlow::Continue(()),
                    Err(e) => {
                        failure = Some(e);
                        ControlFlow::Break(())
                    }
                }
            })?;
            if let Some(e) = failure {
                return Err(e.into());
            }
        }
        Commands::Rpush { key, values } => {
            writeln!(out, "{}", bucket.list(key)?.rpush(values)?)?;
        }
        Commands::Lpush { key, values } => {
            writeln!(out, "{}", bucket.list(key)?.lpush(values)?)?;
        }
        Commands::Lpop { key } => {
            if let Some(value) = bucket.list(key)?.lpop()? {
                write_value(out, &value)?;
            }
        }
        Commands::Rpop { key } => {
            if let Some(value) = bucket.list(key)?.rpop()? {
                write_value(out, &value)?;
            }
        }
        Commands::LtrimLeft { key, count } => {
            writeln!(out, "{}", bucket.list(key)?.lbatch_delete(*count)?)?;
        }
        Commands::LtrimRight { key, count } => {
            writeln!(out, "{}", bucket.list(key)?.rbatch_delete(*count)?)?;
        }
    }
    Ok(())
}

/// Raw bytes followed by a newline
fn write_value<W: Write>(out: &mut W, value: &[u8]) -> std::io::Result<()> {
    out.write_all(value)?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use redlite::Error;
    use tempfile::TempDir;

    fn run_cli(dir: &TempDir, args: &[&str]) -> Result<String> {
        let path = dir.path().join("db");
        let mut argv = vec!["redlite", path.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();

        let mut out = Vec::new();
        execute_command(&cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_string_commands() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_cli(&dir, &["set", "greeting", "hello"]).unwrap(), "OK\n");
        assert_eq!(run_cli(&dir, &["get", "greeting"]).unwrap(), "hello\n");
        assert_eq!(run_cli(&dir, &["type", "greeting"]).unwrap(), "string\n");
        assert_eq!(run_cli(&dir, &["get", "missing"]).unwrap(), "");
        assert_eq!(run_cli(&dir, &["del", "greeting"]).unwrap(), "1\n");
        assert_eq!(run_cli(&dir, &["del", "greeting"]).unwrap(), "0\n");
    }

    #[test]
    fn test_list_commands() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_cli(&dir, &["rpush", "jobs", "b", "c"]).unwrap(), "2\n");
        assert_eq!(run_cli(&dir, &["lpush", "jobs", "a"]).unwrap(), "3\n");
        assert_eq!(run_cli(&dir, &["len", "jobs"]).unwrap(), "3\n");
        assert_eq!(run_cli(&dir, &["index", "jobs", "1"]).unwrap(), "b\n");
        assert_eq!(
            run_cli(&dir, &["range", "jobs", "0", "-1"]).unwrap(),
            "0\ta\n1\tb\n2\tc\n"
        );
        assert_eq!(run_cli(&dir, &["rpop", "jobs"]).unwrap(), "c\n");
        assert_eq!(run_cli(&dir, &["ltrim-left", "jobs", "5"]).unwrap(), "2\n");
        assert_eq!(run_cli(&dir, &["type", "jobs"]).unwrap(), "none\n");
        assert_eq!(run_cli(&dir, &["lpop", "jobs"]).unwrap(), "");
    }

    #[test]
    fn test_buckets_share_keys() {
        let dir = TempDir::new().unwrap();
        run_cli(&dir, &["--bucket", "1", "set", "k", "v"]).unwrap();
        assert_eq!(run_cli(&dir, &["get", "k"]).unwrap(), "v\n");
    }

    #[test]
    fn test_errors_propagate() {
        let dir = TempDir::new().unwrap();
        run_cli(&dir, &["set", "k", "v"]).unwrap();

        let err = run_cli(&dir, &["rpush", "k", "x"]).unwrap_err();
        assert!(matches!(err, Error::WrongType { .. }));

        let err = run_cli(&dir, &["ltrim-right", "k2", "0"]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = run_cli(&dir, &["--read-only", "set", "k", "w"]).unwrap_err();
        assert!(matches!(err, Error::ReadOnly));
    }

    #[test]
    fn test_parse_rejects_missing_values() {
        assert!(Cli::try_parse_from(["redlite", "./db", "rpush", "jobs"]).is_err());
        assert!(Cli::try_parse_from(["redlite", "./db", "frobnicate"]).is_err());
    }
}
