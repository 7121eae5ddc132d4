//! SSH key management and simulated connections.

use cloudsim_store::{Named, SshKey};
use cloudsim_types::error::{Result, SimError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Base name for keys generated without an explicit name.
const DEFAULT_KEY_NAME: &str = "id_ed25519";

/// Register SSH commands.
pub fn register_ssh_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(SshKeygenCmd));
    reg.register(Box::new(SshAddCmd));
    reg.register(Box::new(SshListCmd));
    reg.register(Box::new(SshRemoveCmd));
    reg.register(Box::new(SshCmd));
}

/// First free name in the sequence `id_ed25519`, `id_ed25519_1`, ...
fn next_default_name(env: &Environment<'_>) -> String {
    if !env.store.keys.contains(DEFAULT_KEY_NAME) {
        return DEFAULT_KEY_NAME.to_string();
    }
    (1u32..)
        .map(|n| format!("{DEFAULT_KEY_NAME}_{n}"))
        .find(|name| !env.store.keys.contains(name))
        .unwrap_or_else(|| DEFAULT_KEY_NAME.to_string())
}

fn is_valid_key_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
}

fn key_path(env: &Environment<'_>, name: &str) -> String {
    format!("{}/.ssh/{name}", env.config.home.trim_end_matches('/'))
}

// ---------------------------------------------------------------------------
// ssh-keygen
// ---------------------------------------------------------------------------

struct SshKeygenCmd;
impl Command for SshKeygenCmd {
    fn name(&self) -> &str {
        "ssh-keygen"
    }
    fn description(&self) -> &str {
        "Generate an SSH key pair"
    }
    fn usage(&self) -> &str {
        "ssh-keygen [name]"
    }
    fn category(&self) -> &str {
        "ssh"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 0, 1)?;
        let name = match args.first() {
            Some(name) if !is_valid_key_name(name) => {
                return Err(SimError::InvalidArgument(format!(
                    "ssh-keygen: invalid key name '{name}'"
                )));
            },
            Some(name) => name.to_string(),
            None => next_default_name(env),
        };
        if env.store.keys.contains(&name) {
            return Err(SimError::DuplicateName {
                kind: SshKey::KIND,
                name,
            });
        }

        let comment = format!("{}@{}", env.config.user, env.config.hostname);
        let public_key = env.ids.new_public_key(&comment);
        let key = SshKey::new(name.clone(), public_key, env.clock.now());
        let fingerprint = key.fingerprint().to_string();
        let public_key = key.public_key().to_string();
        env.store.keys.add(key)?;
        log::info!("generated ssh key {name}");

        let path = key_path(env, &name);
        Ok(CommandOutput::Text(format!(
            "Generating public/private ed25519 key pair.\n\
             Your identification has been saved in {path}\n\
             Your public key has been saved in {path}.pub\n\
             The key fingerprint is:\n\
             {fingerprint} {comment}\n\
             The public key is:\n\
             {public_key}"
        )))
    }
}

// ---------------------------------------------------------------------------
// ssh-add
// ---------------------------------------------------------------------------

struct SshAddCmd;
impl Command for SshAddCmd {
    fn name(&self) -> &str {
        "ssh-add"
    }
    fn description(&self) -> &str {
        "Add a key to the SSH agent"
    }
    fn usage(&self) -> &str {
        "ssh-add <name>"
    }
    fn category(&self) -> &str {
        "ssh"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 1, 1)?;
        let name = args[0];
        let newly_added = env.store.keys.update(name, |k| Ok(k.mark_added()))?;
        let path = key_path(env, name);
        let comment = format!("{}@{}", env.config.user, env.config.hostname);
        if newly_added {
            log::info!("ssh key {name} added to agent");
            Ok(CommandOutput::Text(format!(
                "Identity added: {path} ({comment})"
            )))
        } else {
            Ok(CommandOutput::Text(format!(
                "Identity already added: {path} ({comment})"
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// ssh-list
// ---------------------------------------------------------------------------

struct SshListCmd;
impl Command for SshListCmd {
    fn name(&self) -> &str {
        "ssh-list"
    }
    fn description(&self) -> &str {
        "List SSH keys"
    }
    fn usage(&self) -> &str {
        "ssh-list"
    }
    fn category(&self) -> &str {
        "ssh"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 0, 0)?;
        if env.store.keys.is_empty() {
            return Ok(CommandOutput::Text(
                "No SSH keys found. Use 'ssh-keygen [name]' to generate one.".to_string(),
            ));
        }
        let rows = env
            .store
            .keys
            .iter()
            .map(|k| {
                vec![
                    k.name().to_string(),
                    k.fingerprint().to_string(),
                    k.created().to_string(),
                    if k.is_added() { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        Ok(CommandOutput::table(
            &["NAME", "FINGERPRINT", "CREATED", "AGENT"],
            rows,
        ))
    }
}

// ---------------------------------------------------------------------------
// ssh-remove
// ---------------------------------------------------------------------------

struct SshRemoveCmd;
impl Command for SshRemoveCmd {
    fn name(&self) -> &str {
        "ssh-remove"
    }
    fn description(&self) -> &str {
        "Delete an SSH key"
    }
    fn usage(&self) -> &str {
        "ssh-remove <name>"
    }
    fn category(&self) -> &str {
        "ssh"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 1, 1)?;
        let removed = env.store.keys.remove(args[0])?;
        log::info!("removed ssh key {}", removed.name());
        Ok(CommandOutput::Text(format!(
            "Removed key '{}' ({})",
            removed.name(),
            removed.fingerprint()
        )))
    }
}

// ---------------------------------------------------------------------------
// ssh
// ---------------------------------------------------------------------------

/// Split `user@host`, rejecting anything that is not a plain login target.
fn parse_target(target: &str) -> Option<(&str, &str)> {
    let (user, host) = target.split_once('@')?;
    let user_ok = !user.is_empty()
        && user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    let host_ok = !host.is_empty()
        && !host.starts_with(['.', '-'])
        && !host.ends_with(['.', '-'])
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'));
    (user_ok && host_ok).then_some((user, host))
}

struct SshCmd;
impl Command for SshCmd {
    fn name(&self) -> &str {
        "ssh"
    }
    fn description(&self) -> &str {
        "Connect to a remote host"
    }
    fn usage(&self) -> &str {
        "ssh <user@host>"
    }
    fn category(&self) -> &str {
        "ssh"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 1, 1)?;
        let (user, host) = parse_target(args[0]).ok_or_else(|| {
            SimError::InvalidArgument(format!(
                "ssh: invalid host syntax '{}'\nusage: {}",
                args[0],
                self.usage()
            ))
        })?;

        let auth = match env.store.keys.iter().find(|k| k.is_added()) {
            Some(key) => format!(
                "Authenticated to {host} using public key '{}' ({}).",
                key.name(),
                key.fingerprint()
            ),
            None => format!("{user}@{host}: authenticated with password."),
        };
        log::debug!("simulated ssh session to {user}@{host}");

        Ok(CommandOutput::Text(format!(
            "Connecting to {host} as {user}...\n\
             {auth}\n\
             Welcome to {host}\n\
             Last login: {} from {}\n\
             Connection to {host} closed.",
            env.clock.now(),
            env.config.hostname
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::tests::Harness;

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        register_ssh_commands(&mut reg);
        reg
    }

    fn is_colon_hex(s: &str) -> bool {
        let parts: Vec<&str> = s.split(':').collect();
        parts.len() == 16
            && parts
                .iter()
                .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
    }

    #[test]
    fn keygen_then_list() {
        let reg = registry();
        let mut h = Harness::new();
        let out = h.text(&reg, "ssh-keygen foo");
        let key = h.store.keys.get("foo").unwrap().clone();
        assert!(out.contains(key.fingerprint()));
        assert!(out.contains(key.public_key()));
        assert!(out.contains("~/.ssh/foo.pub"));
        assert!(is_colon_hex(key.fingerprint()));

        let list = h.text(&reg, "ssh-list");
        let rows: Vec<&str> = list.lines().skip(1).collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("foo "));
        assert!(rows[0].contains(key.fingerprint()));
        assert!(rows[0].ends_with("no"));
    }

    #[test]
    fn keygen_comment_uses_config_identity() {
        let reg = registry();
        let mut h = Harness::new();
        h.config.user = "alice".into();
        h.config.hostname = "devbox".into();
        h.text(&reg, "ssh-keygen k");
        assert!(
            h.store
                .keys
                .get("k")
                .unwrap()
                .public_key()
                .ends_with(" alice@devbox")
        );
    }

    #[test]
    fn keygen_default_names_advance() {
        let reg = registry();
        let mut h = Harness::new();
        h.text(&reg, "ssh-keygen");
        h.text(&reg, "ssh-keygen");
        h.text(&reg, "ssh-keygen");
        let names: Vec<&str> = h.store.keys.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["id_ed25519", "id_ed25519_1", "id_ed25519_2"]);
    }

    #[test]
    fn keygen_duplicate_and_invalid_names() {
        let reg = registry();
        let mut h = Harness::new();
        h.text(&reg, "ssh-keygen foo");
        assert!(matches!(
            h.run(&reg, "ssh-keygen foo"),
            Err(SimError::DuplicateName { .. })
        ));
        assert!(matches!(
            h.run(&reg, "ssh-keygen ../evil"),
            Err(SimError::InvalidArgument(_))
        ));
        assert_eq!(h.store.keys.len(), 1);
    }

    #[test]
    fn distinct_keys_get_distinct_fingerprints() {
        let reg = registry();
        let mut h = Harness::new();
        h.text(&reg, "ssh-keygen a");
        h.text(&reg, "ssh-keygen b");
        let a = h.store.keys.get("a").unwrap().fingerprint().to_string();
        let b = h.store.keys.get("b").unwrap().fingerprint().to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn list_empty() {
        let reg = registry();
        let mut h = Harness::new();
        assert!(h.text(&reg, "ssh-list").starts_with("No SSH keys found"));
    }

    #[test]
    fn add_is_idempotent() {
        let reg = registry();
        let mut h = Harness::new();
        h.text(&reg, "ssh-keygen foo");
        assert!(h.text(&reg, "ssh-add foo").starts_with("Identity added"));
        assert!(h.text(&reg, "ssh-add foo").starts_with("Identity already added"));
        assert!(h.store.keys.get("foo").unwrap().is_added());
        assert!(h.text(&reg, "ssh-list").lines().nth(1).unwrap().ends_with("yes"));
    }

    #[test]
    fn add_errors() {
        let reg = registry();
        let mut h = Harness::new();
        assert!(matches!(
            h.run(&reg, "ssh-add"),
            Err(SimError::MissingArgument { .. })
        ));
        assert!(matches!(
            h.run(&reg, "ssh-add ghost"),
            Err(SimError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_key() {
        let reg = registry();
        let mut h = Harness::new();
        h.text(&reg, "ssh-keygen foo");
        assert!(h.text(&reg, "ssh-remove foo").contains("Removed key 'foo'"));
        assert!(h.store.keys.is_empty());
        assert!(h.run(&reg, "ssh-remove foo").is_err());
    }

    #[test]
    fn connect_banner() {
        let reg = registry();
        let mut h = Harness::new();
        let out = h.text(&reg, "ssh admin@db.internal");
        assert!(out.contains("Connecting to db.internal as admin"));
        assert!(out.contains("password"));
        assert!(out.contains("Last login: 12:00:00"));
    }

    #[test]
    fn connect_uses_agent_key() {
        let reg = registry();
        let mut h = Harness::new();
        h.text(&reg, "ssh-keygen deploy");
        h.text(&reg, "ssh-add deploy");
        let out = h.text(&reg, "ssh git@example.com");
        assert!(out.contains("public key 'deploy'"));
    }

    #[test]
    fn connect_rejects_bad_targets() {
        let reg = registry();
        let mut h = Harness::new();
        for target in ["example.com", "@host", "user@", "a@b@c", "user@-host", "u ser@h"] {
            let line = format!("ssh {target}");
            let result = h.run(&reg, &line);
            assert!(result.is_err(), "`{line}` should fail");
        }
        let err = h.run(&reg, "ssh example.com").unwrap_err();
        assert!(format!("{err}").contains("invalid host syntax"));
        assert!(matches!(
            h.run(&reg, "ssh"),
            Err(SimError::MissingArgument { .. })
        ));
    }
}
