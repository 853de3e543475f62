use crate::cli::actions::Action;
use crate::gate::state::DEFAULT_SESSION_TTL_SECONDS;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        base_url: matches
            .get_one("base-url")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --base-url"))?,
        session_ttl_seconds: matches
            .get_one::<u64>("session-ttl")
            .copied()
            .unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
    })
}
