//! # marker-overlay CLI
//!
//! Command-line interface for the marker similarity scorer and overlay controller.
//!
//! ## Usage
//! ```bash
//! marker-overlay score target.png upload.jpg
//! marker-overlay catalog upload.jpg ~/markers --limit 5 --output json
//! marker-overlay replay signals.txt
//! ```

mod cli;

use marker_overlay::Result;

fn main() -> Result<()> {
    cli::run()
}
