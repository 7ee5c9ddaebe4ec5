// crates/server/src/config.rs
//! Command-line and environment configuration.
//!
//! Flags win over environment variables, which win over defaults. An
//! environment variable set to the empty string counts as unset.

use std::ffi::OsString;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

const DEFAULT_DB_PATH: &str = "./timesheet.db";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Long flags that may also be written with a single dash (`-db`, `-port`).
const LONG_FLAGS: &[&str] = &["db", "port", "host", "help", "version"];

#[derive(Debug, Parser)]
#[command(name = "timesheet", version, about = "Personal time-tracking web service")]
pub struct Cli {
    /// Path to the SQLite database file [env: DB_PATH] [default: ./timesheet.db]
    #[arg(long = "db")]
    pub db: Option<PathBuf>,

    /// Port to listen on [env: PORT] [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind [env: HOST] [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<IpAddr>,
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    /// Parse from an argv-style iterator (first item is the program name),
    /// falling back to the environment and then to defaults.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let cli = Cli::try_parse_from(normalize_args(args))?;

        let db_path = match cli.db {
            Some(path) => path,
            None => PathBuf::from(env_value("DB_PATH").as_deref().unwrap_or(DEFAULT_DB_PATH)),
        };
        let port = match cli.port {
            Some(port) => port,
            None => env_parsed("PORT")?.unwrap_or(DEFAULT_PORT),
        };
        let host = match cli.host {
            Some(host) => host,
            None => env_parsed("HOST")?.unwrap_or(DEFAULT_HOST),
        };

        Ok(Self {
            db_path,
            host,
            port,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// A non-empty environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parsed<T>(name: &str) -> Result<Option<T>, clap::Error>
where
    T: FromStr,
    T::Err: Display,
{
    env_value(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                Cli::command().error(
                    ErrorKind::InvalidValue,
                    format!("invalid value '{raw}' for {name}: {e}"),
                )
            })
        })
        .transpose()
}

/// Rewrite `-db`, `-port=9000` and friends to their `--` form.
///
/// Anything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let rewritten = match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_long_flag(rest) => {
                    Some(format!("--{rest}"))
                }
                _ => None,
            };
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

fn is_long_flag(flag: &str) -> bool {
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
