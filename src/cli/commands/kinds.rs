//! Kinds command handler

use chat_viz::core::chart::kinds::{grouped, KINDS};

/// Print supported chart kinds grouped by category
pub fn run() {
    println!("\n=== Supported chart kinds ({}) ===\n", KINDS.len());
    for (label, kinds) in grouped() {
        println!("{label}");
        for spec in kinds {
            println!("  {:<22} {}", spec.name, spec.category.columns());
        }
        println!();
    }
    println!("Use type=\"file\" with <options><filename>PATH</filename></options> to load a block from disk.");
}
