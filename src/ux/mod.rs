use colored::Colorize;
use humansize::{format_size, BINARY};

use crate::errors::ProtocolError;
use crate::library::VariantInfo;
use crate::wire::{Artifact, QuickAction, QuickActionKind};

pub fn show_variants(variants: &[VariantInfo]) {
    println!("\n=== PROMPTS ===");
    for (i, v) in variants.iter().enumerate() {
        println!("{}. {}  {}", i + 1, format!("[{}]", v.id).cyan().bold(), v.label.bold());
        println!("   {}", v.description);
    }
    println!();
}

pub fn print_render_summary(variant: &str, document: &str) {
    eprintln!(
        "{} {}  {}  {} lines",
        "rendered".green().bold(),
        variant.bold(),
        format_size(document.len(), BINARY),
        document.lines().count()
    );
}

pub fn print_check_report(actions: &[QuickAction], artifacts: &[(Artifact, Result<usize, ProtocolError>)]) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━━━ Reply Check ━━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    for (i, a) in actions.iter().enumerate() {
        let tag = match a.kind {
            QuickActionKind::Implement => "[IMPLEMENT]".green().bold(),
            QuickActionKind::Message => "[MESSAGE]".yellow().bold(),
            QuickActionKind::Link => "[LINK]".cyan().bold(),
            QuickActionKind::File => "[FILE]".magenta().bold(),
        };
        println!("{}. {}  {} — {}", i + 1, tag, a.label, a.value);
    }
    for (artifact, pairing) in artifacts {
        match pairing {
            Ok(pairs) => println!("{}  {} ({} paired schema change(s))", "[OK]".green().bold(), artifact.id, pairs),
            Err(e) => println!("{}  {}", "[BROKEN]".red().bold(), e),
        }
    }
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
}
