//! Per-cycle trace rendering.
//!
//! `display` mode prints, for every cycle, the instruction currently
//! sitting in each of the seven stages. This module owns that rendering so
//! both the interactive `display` mode and the final simulation dump use
//! the same formatting.

use crate::core::pipeline::{Latch, Stage};

/// One line of a cycle trace: a stage label and the instruction in it.
pub struct StageTraceLine {
    /// The stage this line describes.
    pub stage: Stage,
    /// Rendered instruction text, or `"Empty"` for a bubble.
    pub text: String,
}

/// Render the instruction occupying every stage this cycle.
pub fn render_cycle(latches: &[Latch; 7]) -> Vec<StageTraceLine> {
    Stage::ALL
        .iter()
        .map(|&stage| StageTraceLine {
            stage,
            text: render_latch(&latches[stage.index()]),
        })
        .collect()
}

fn render_latch(latch: &Latch) -> String {
    if latch.is_occupied() {
        latch.instruction.to_string()
    } else {
        "Empty".to_string()
    }
}

/// Print a cycle's trace to stdout in the teacher's plain-text style.
pub fn print_cycle(cycle: u64, latches: &[Latch; 7]) {
    println!("--------------------------------");
    println!("Clock Cycle #{}", cycle);
    println!("--------------------------------");
    for line in render_cycle(latches) {
        println!("{:<12}: {}", line.stage.label(), line.text);
    }
}
