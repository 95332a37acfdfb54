//! BDD step definitions for configuration feature

use alarm_relay::{build_relay, Config, RelayError};
use cucumber::{given, then, when};

use crate::world::RelayWorld;

#[given("a default configuration")]
fn default_config(world: &mut RelayWorld) {
    world.config = Some(Config::default());
}

#[given(expr = "a configuration with webhook URL {string}")]
fn config_with_webhook(world: &mut RelayWorld, url: String) {
    world.config = Some(Config {
        webhook_url: Some(url),
        ..Config::default()
    });
}

#[given(expr = "the environment variable {string} is {string}")]
fn set_env(world: &mut RelayWorld, name: String, value: String) {
    world.env.insert(name, value);
}

#[when("the relay is built")]
fn build(world: &mut RelayWorld) {
    let mut config = world.config.take().expect("config not set");
    let env = world.env.clone();
    let result = config
        .resolve_secrets_with(|name| env.get(name).cloned())
        .and_then(|()| build_relay(&config).map(|_| ()));
    world.config = Some(config);
    world.build_result = Some(result);
}

#[then("building should succeed")]
fn build_succeeds(world: &mut RelayWorld) {
    let result = world.build_result.as_ref().expect("no build result");
    result.as_ref().unwrap();
}

#[then("building should fail with a configuration error")]
fn build_fails(world: &mut RelayWorld) {
    let result = world.build_result.as_ref().expect("no build result");
    let err = result.as_ref().unwrap_err();
    assert!(matches!(err, RelayError::Config(_)), "expected Config error, got {err:?}");
}

#[then(expr = "the resolved webhook URL should be {string}")]
fn resolved_webhook(world: &mut RelayWorld, expected: String) {
    let config = world.config.as_ref().expect("config not set");
    assert_eq!(config.validated_webhook_url().unwrap(), expected);
}

#[then(expr = "the request timeout should be {int} milliseconds")]
fn resolved_timeout(world: &mut RelayWorld, millis: u64) {
    let config = world.config.as_ref().expect("config not set");
    assert_eq!(config.timeout.as_millis() as u64, millis);
}
