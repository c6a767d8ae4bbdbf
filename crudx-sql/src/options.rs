//! Mysql connection options
//!
//! Options can be built in code, loaded from yaml, or parsed from a DSN of the form
//! `<user>:<password>@tcp(<addr>)/<database>[?charset=<charset>][&parseTime=<bool>]`.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use nom::bytes::complete::{tag, take_till, take_till1, take_until1};
use nom::combinator::{all_consuming, opt};
use nom::multi::separated_list0;
use nom::sequence::{preceded, separated_pair, tuple};
use nom::IResult;
use serde::{Deserialize, Serialize};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

use crate::{NomError, SqlError, SqlResult};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3306";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_LOG_TARGET: &str = "crudx";
/// used when `max_open_conns` is 0
pub const DEFAULT_MAX_OPEN_CONNS: u32 = 10;

const DSN_CHARSET: &str = "charset";
const DSN_PARSE_TIME: &str = "parseTime";

/// Durations are (de)serialized as whole seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

/// Options of a mysql client
///
/// A zero duration means no limit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
    pub addr: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub charset: Option<String>,
    /// pool size ceiling, 0 falls back to `DEFAULT_MAX_OPEN_CONNS`
    pub max_open_conns: u32,
    /// connections the pool keeps open while idle, capped by `max_open_conns`.
    ///
    /// `sqlx` has no ceiling on idle connections, so unlike a `database/sql` style
    /// `MaxIdleConns` this is a floor: the pool opens them eagerly and keeps them warm.
    /// Idle connections above it are closed after `max_idle_time`.
    pub max_idle_conns: u32,
    #[serde(with = "duration_secs")]
    pub max_lifetime: Duration,
    #[serde(with = "duration_secs")]
    pub max_idle_time: Duration,
    pub parse_time: bool,
    /// `log` target every message of the client is emitted under
    pub log_target: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            addr: DEFAULT_ADDR.to_owned(),
            username: String::new(),
            password: String::new(),
            database: String::new(),
            charset: None,
            max_open_conns: 0,
            max_idle_conns: 0,
            max_lifetime: Duration::ZERO,
            max_idle_time: Duration::ZERO,
            parse_time: false,
            log_target: DEFAULT_LOG_TARGET.to_owned(),
        }
    }
}

impl Options {
    /// constructor
    pub fn new(addr: &str, username: &str, password: &str, database: &str) -> Self {
        Options {
            addr: addr.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
            database: database.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_charset(&mut self, charset: &str) -> &mut Self {
        self.charset = Some(charset.to_owned());
        self
    }

    pub fn with_max_open_conns(&mut self, n: u32) -> &mut Self {
        self.max_open_conns = n;
        self
    }

    pub fn with_max_idle_conns(&mut self, n: u32) -> &mut Self {
        self.max_idle_conns = n;
        self
    }

    pub fn with_max_lifetime(&mut self, d: Duration) -> &mut Self {
        self.max_lifetime = d;
        self
    }

    pub fn with_max_idle_time(&mut self, d: Duration) -> &mut Self {
        self.max_idle_time = d;
        self
    }

    pub fn with_parse_time(&mut self, parse_time: bool) -> &mut Self {
        self.parse_time = parse_time;
        self
    }

    pub fn with_log_target(&mut self, target: &str) -> &mut Self {
        self.log_target = target.to_owned();
        self
    }

    /// load options from a yaml string, missing keys take their default
    pub fn from_yaml_str(s: &str) -> SqlResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// load options from a yaml file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&s)
    }

    /// addr, username, password and database must not be empty
    pub fn validate(&self) -> SqlResult<()> {
        let required = [
            ("addr", &self.addr),
            ("username", &self.username),
            ("password", &self.password),
            ("database", &self.database),
        ];

        let missing = required
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| *k)
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(SqlError::new_invalid_config_error(format!(
                "{} must not be empty",
                missing.join("/")
            )));
        }

        Ok(())
    }

    /// DSN string
    pub fn dsn(&self) -> SqlResult<String> {
        self.validate()?;
        Ok(self.dsn_with_password(&self.password))
    }

    fn dsn_with_password(&self, password: &str) -> String {
        let mut dsn = format!(
            "{}:{}@tcp({})/{}",
            self.username, password, self.addr, self.database
        );

        let mut params = Vec::new();
        if let Some(c) = &self.charset {
            params.push(format!("{DSN_CHARSET}={c}"));
        }
        if self.parse_time {
            params.push(format!("{DSN_PARSE_TIME}=true"));
        }
        if !params.is_empty() {
            dsn.push('?');
            dsn.push_str(&params.join("&"));
        }

        dsn
    }

    /// split `addr` into host and port, port defaults to 3306
    pub fn host_and_port(&self) -> SqlResult<(&str, u16)> {
        match self.addr.rsplit_once(':') {
            Some((host, port)) => Ok((host, port.parse::<u16>()?)),
            None => Ok((self.addr.as_str(), DEFAULT_PORT)),
        }
    }

    /// driver connect options, built from the fields (not from the DSN text)
    pub fn connect_options(&self) -> SqlResult<MySqlConnectOptions> {
        self.validate()?;
        let (host, port) = self.host_and_port()?;

        let mut opts = MySqlConnectOptions::new()
            .host(host)
            .port(port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database);

        if let Some(c) = &self.charset {
            opts = opts.charset(c);
        }

        Ok(opts)
    }

    /// pool settings: max open, max idle as the warm floor (capped by max open), lifetime and idle time
    pub fn pool_options(&self) -> MySqlPoolOptions {
        let max_open = match self.max_open_conns {
            0 => DEFAULT_MAX_OPEN_CONNS,
            n => n,
        };

        MySqlPoolOptions::new()
            .max_connections(max_open)
            .min_connections(self.max_idle_conns.min(max_open))
            .max_lifetime(non_zero(self.max_lifetime))
            .idle_timeout(non_zero(self.max_idle_time))
    }
}

fn non_zero(d: Duration) -> Option<Duration> {
    if d.is_zero() {
        None
    } else {
        Some(d)
    }
}

/// password is masked
impl Display for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dsn_with_password("***"))
    }
}

// ================================================================================================
// DSN parsing
// ================================================================================================

// Nom parser result type: ((username, password), (addr, database), params)
type DsnPattern<'a> = (
    (&'a str, &'a str),
    (&'a str, &'a str),
    Option<Vec<(&'a str, &'a str)>>,
);

fn dsn_param(input: &str) -> IResult<&str, (&str, &str), NomError> {
    separated_pair(take_till1(|c: char| c == '='), tag("="), take_till(|c: char| c == '&'))(input)
}

fn dsn_pattern(input: &str) -> IResult<&str, DsnPattern<'_>, NomError> {
    let f_user_and_password = separated_pair(take_until1(":"), tag(":"), take_until1("@tcp("));
    let f_addr = preceded(tag("@tcp("), take_until1(")"));
    let f_database = preceded(tag(")/"), take_till1(|c: char| c == '?'));
    let f_params = opt(preceded(tag("?"), separated_list0(tag("&"), dsn_param)));

    all_consuming(tuple((
        f_user_and_password,
        tuple((f_addr, f_database)),
        f_params,
    )))(input)
}

fn parse_bool(key: &str, value: &str) -> SqlResult<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(SqlError::new_invalid_config_error(format!(
            "invalid bool for {key}: {value}"
        ))),
    }
}

impl<'a> TryFrom<DsnPattern<'a>> for Options {
    type Error = SqlError;

    fn try_from(source: DsnPattern<'a>) -> Result<Self, Self::Error> {
        let ((username, password), (addr, database), params) = source;
        let mut options = Options::new(addr, username, password, database);

        for (k, v) in params.unwrap_or_default() {
            match k {
                DSN_CHARSET => {
                    options.with_charset(v);
                }
                DSN_PARSE_TIME => {
                    options.with_parse_time(parse_bool(k, v)?);
                }
                _ => log::warn!(target: DEFAULT_LOG_TARGET, "unsupported dsn param: {k}={v}"),
            }
        }

        Ok(options)
    }
}

impl FromStr for Options {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, res) = dsn_pattern(s)?;
        Options::try_from(res)
    }
}
