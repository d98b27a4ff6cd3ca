//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use simpleeq_core::{ParamDescriptor, ParamFlags};
use simpleeq_dsp::parameter_layout;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single parameter (string ID or name)
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let layout = parameter_layout();

    if let Some(wanted) = &args.param {
        let desc = layout
            .iter()
            .find(|d| d.string_id.eq_ignore_ascii_case(wanted) || d.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", wanted))?;
        print_detail(desc);
        return Ok(());
    }

    println!("SimpleEQ Parameters");
    println!("===================");
    println!();
    println!(
        "  {:4}  {:15}  {:14}  {:>12}  {:>24}  {}",
        "ID", "Key", "Name", "Default", "Range", "Group"
    );
    println!(
        "  {:4}  {:15}  {:14}  {:>12}  {:>24}  {}",
        "--", "---", "----", "-------", "-----", "-----"
    );
    for desc in &layout {
        println!(
            "  {:4}  {:15}  {:14}  {:>12}  {:>24}  {}",
            desc.id.0,
            desc.string_id,
            desc.name,
            format_value(desc, desc.default),
            format!(
                "{} .. {}",
                format_value(desc, desc.min),
                format_value(desc, desc.max)
            ),
            desc.group
        );
    }

    println!();
    println!("Set values with: simpleeq process in.wav out.wav --param peak_gain=4.5");
    Ok(())
}

fn print_detail(desc: &ParamDescriptor) {
    println!("{}", desc.name);
    println!("{}", "=".repeat(desc.name.len()));
    println!();
    println!("  Key:       {}", desc.string_id);
    println!("  ID:        {}", desc.id.0);
    println!("  Group:     {}", desc.group);
    println!("  Default:   {}", format_value(desc, desc.default));
    println!(
        "  Range:     {} .. {}",
        format_value(desc, desc.min),
        format_value(desc, desc.max)
    );
    println!("  Step:      {}", desc.step);
    println!("  Scale:     {:?}", desc.scale);
    if desc.flags.contains(ParamFlags::STEPPED) {
        println!("  Stepped:   yes (values snap to the nearest step)");
    }
}

fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    format!("{}{}", value, desc.unit.suffix())
}
