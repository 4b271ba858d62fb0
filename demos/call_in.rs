//! call_in Example - Let `call` decide where the block goes
//!
//! `render_in` always runs its block first. `call_in` binds the block
//! instead and `call` places it with `yield_content`.
//!
//! Run with: cargo run --example call_in

use std::error::Error;

use spark_slots::{Args, ComponentClass};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let spacer = ComponentClass::<Vec<String>>::builder("VerticalSpaceComponent")
        .call(|this, lines: &mut Vec<String>| {
            lines.push("Up here".into());
            this.yield_content(lines)?;
            lines.push("Down there".into());
            Ok(())
        })
        .build()?;

    let mut lines = Vec::new();
    spacer.construct(Args::new())?.call_in(&mut lines, |lines| {
        lines.push("In between".into());
        Ok(())
    })?;
    println!("call_in:   {lines:?}");

    // render_in yields upfront, so the block lands before `call` output
    let mut lines = Vec::new();
    spacer.construct(Args::new())?.render_in(&mut lines, |_, lines| {
        lines.push("In between".into());
        Ok(())
    })?;
    println!("render_in: {lines:?}");

    Ok(())
}
