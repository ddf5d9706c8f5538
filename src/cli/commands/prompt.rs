//! Prompt command handler

use chat_viz::core::prompt::rendering_capabilities;

/// Print the rendering-capabilities prompt section
pub fn run() {
    print!("{}", rendering_capabilities());
}
