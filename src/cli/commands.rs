//! Command implementations

use tracing::info;

use super::args::{Cli, Command, ShowArgs};
use crate::config::{load_config, OptimizerBuilder, SchedulerBuilder};
use crate::error::Result;
use crate::nn::ParamStore;
use crate::registry::Registry;
use crate::Tensor;

/// Execute a parsed command line
pub fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::List => {
            for line in list_lines(&OptimizerBuilder::default(), &SchedulerBuilder::default()) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Show(args) => run_show(&args),
    }
}

fn registry_line<C: Copy>(label: &str, registry: &Registry<C>) -> String {
    format!("{label} ({}): {}", registry.kind(), registry.names().join(", "))
}

fn list_lines(optimizers: &OptimizerBuilder, schedulers: &SchedulerBuilder) -> Vec<String> {
    vec![
        registry_line("Optimizers", optimizers.builtin()),
        registry_line("Optimizers", optimizers.custom()),
        registry_line("LR schedulers", schedulers.builtin()),
        registry_line("LR schedulers", schedulers.custom()),
    ]
}

/// Small two-layer model used by `show`; overrides may name any of its parameters
pub fn demo_model() -> ParamStore {
    ParamStore::new()
        .with("layer1.weight", Tensor::zeros(16, true))
        .with("layer1.bias", Tensor::zeros(4, true))
        .with("head.weight", Tensor::zeros(8, true))
        .with("head.bias", Tensor::zeros(2, true))
}

fn run_show(args: &ShowArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    info!(config = %args.config.display(), optimizer = %config.optim.kind, "building optimizer");

    let model = demo_model();
    let mut optimizer = OptimizerBuilder::default().build(&config.optim, &model, &config.overrides)?;

    let Some(sched_config) = &config.lr_scheduler else {
        println!("No LR_SCHEDULER configured; lr stays at {}", optimizer.lr());
        return Ok(());
    };

    let mut scheduler = SchedulerBuilder::default().build(sched_config, optimizer.as_mut())?;
    println!("{} over {} epochs", scheduler.name(), args.epochs);
    for epoch in 0..args.epochs {
        if epoch > 0 {
            scheduler.step(optimizer.as_mut());
        }
        let lrs: Vec<String> = scheduler.get_last_lr().iter().map(f64::to_string).collect();
        println!("Epoch {epoch} | lr {}", lrs.join(", "));
    }
    Ok(())
}
