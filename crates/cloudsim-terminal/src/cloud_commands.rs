//! Instance lifecycle commands: create, instances, start, stop, describe, delete.

use cloudsim_store::{Instance, InstanceType, Named};
use cloudsim_types::error::{Result, SimError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment, expect_subcommand};

/// Register instance commands.
pub fn register_cloud_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(CreateCmd));
    reg.register(Box::new(InstancesCmd));
    reg.register(Box::new(StartCmd));
    reg.register(Box::new(StopCmd));
    reg.register(Box::new(DescribeCmd));
    reg.register(Box::new(DeleteCmd));
}

/// Parse `instance <name>` with nothing after it.
fn instance_name<'a>(cmd: &dyn Command, args: &[&'a str]) -> Result<&'a str> {
    let rest = expect_subcommand(cmd, args, "instance")?;
    match rest {
        [name] => Ok(*name),
        [] => Err(SimError::missing(cmd.name(), cmd.usage())),
        _ => Err(SimError::InvalidArgument(format!(
            "{}: too many arguments\nusage: {}",
            cmd.name(),
            cmd.usage()
        ))),
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

struct CreateCmd;
impl Command for CreateCmd {
    fn name(&self) -> &str {
        "create"
    }
    fn description(&self) -> &str {
        "Create a cloud instance"
    }
    fn usage(&self) -> &str {
        "create instance <name> <type>"
    }
    fn category(&self) -> &str {
        "cloud"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let rest = expect_subcommand(self, args, "instance")?;
        self.check_arity(rest, 2, 2)?;
        let (name, type_str) = (rest[0], rest[1]);

        let instance_type: InstanceType = type_str.parse()?;
        if env.store.instances.contains(name) {
            return Err(SimError::DuplicateName {
                kind: Instance::KIND,
                name: name.to_string(),
            });
        }

        let id = env.ids.new_instance_id();
        let instance = Instance::new(
            id.clone(),
            name.to_string(),
            instance_type,
            env.clock.now(),
        );
        env.store.instances.add(instance)?;
        log::info!("created {instance_type} instance {name} ({id})");

        Ok(CommandOutput::Text(format!(
            "Created {instance_type} instance '{name}'\n  ID:     {id}\n  Status: running"
        )))
    }
}

// ---------------------------------------------------------------------------
// instances
// ---------------------------------------------------------------------------

struct InstancesCmd;
impl Command for InstancesCmd {
    fn name(&self) -> &str {
        "instances"
    }
    fn description(&self) -> &str {
        "List cloud instances"
    }
    fn usage(&self) -> &str {
        "instances list [type]"
    }
    fn category(&self) -> &str {
        "cloud"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let rest = expect_subcommand(self, args, "list")?;
        self.check_arity(rest, 0, 1)?;
        let filter = rest
            .first()
            .map(|t| t.parse::<InstanceType>())
            .transpose()?;

        let instances = env
            .store
            .instances
            .list_where(|i| filter.is_none_or(|t| i.instance_type() == t));
        if instances.is_empty() {
            return Ok(CommandOutput::Text(match filter {
                Some(t) => format!("No {t} instances found."),
                None => "No instances found. Use 'create instance <name> <type>' to create one."
                    .to_string(),
            }));
        }

        let rows = instances
            .iter()
            .map(|i| {
                vec![
                    i.id().to_string(),
                    i.name().to_string(),
                    i.instance_type().to_string(),
                    i.status().to_string(),
                ]
            })
            .collect();
        Ok(CommandOutput::table(&["ID", "NAME", "TYPE", "STATUS"], rows))
    }
}

// ---------------------------------------------------------------------------
// start / stop
// ---------------------------------------------------------------------------

struct StartCmd;
impl Command for StartCmd {
    fn name(&self) -> &str {
        "start"
    }
    fn description(&self) -> &str {
        "Start a stopped instance"
    }
    fn usage(&self) -> &str {
        "start instance <name>"
    }
    fn category(&self) -> &str {
        "cloud"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = instance_name(self, args)?;
        let id = env.store.instances.update(name, |i| {
            i.start()?;
            Ok(i.id().to_string())
        })?;
        Ok(CommandOutput::Text(format!(
            "Starting instance '{name}' ({id})... done\n  Status: running"
        )))
    }
}

struct StopCmd;
impl Command for StopCmd {
    fn name(&self) -> &str {
        "stop"
    }
    fn description(&self) -> &str {
        "Stop a running instance"
    }
    fn usage(&self) -> &str {
        "stop instance <name>"
    }
    fn category(&self) -> &str {
        "cloud"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = instance_name(self, args)?;
        let id = env.store.instances.update(name, |i| {
            i.stop()?;
            Ok(i.id().to_string())
        })?;
        Ok(CommandOutput::Text(format!(
            "Stopping instance '{name}' ({id})... done\n  Status: stopped"
        )))
    }
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

struct DescribeCmd;
impl Command for DescribeCmd {
    fn name(&self) -> &str {
        "describe"
    }
    fn description(&self) -> &str {
        "Show instance details"
    }
    fn usage(&self) -> &str {
        "describe instance <name>"
    }
    fn category(&self) -> &str {
        "cloud"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = instance_name(self, args)?;
        let i = env
            .store
            .instances
            .get(name)
            .ok_or_else(|| SimError::NotFound {
                kind: Instance::KIND,
                name: name.to_string(),
            })?;
        Ok(CommandOutput::Text(format!(
            "Instance: {}\n  ID:      {}\n  Name:    {}\n  Type:    {}\n  Status:  {}\n  Created: {}",
            i.name(),
            i.id(),
            i.name(),
            i.instance_type(),
            i.status(),
            i.created()
        )))
    }
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

struct DeleteCmd;
impl Command for DeleteCmd {
    fn name(&self) -> &str {
        "delete"
    }
    fn description(&self) -> &str {
        "Delete an instance"
    }
    fn usage(&self) -> &str {
        "delete instance <name>"
    }
    fn category(&self) -> &str {
        "cloud"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = instance_name(self, args)?;
        let removed = env.store.instances.remove(name)?;
        log::info!("deleted instance {name} ({})", removed.id());
        Ok(CommandOutput::Text(format!(
            "Deleted instance '{name}' ({})",
            removed.id()
        )))
    }
}
