/// Example program to print the loaded configuration
///
/// Run with: cargo run -p powertext-config --example print_config

fn main() {
    // Load configuration from powertext.toml plus POWERTEXT_* overrides
    let config = powertext_config::PowerTextConfig::load();

    println!("=== PowerText Configuration ===\n");

    println!("Text Settings:");
    for (idx, font) in config.text.fonts.iter().enumerate() {
        println!(
            "  Rule {idx}: {} @ {}px, matcher {:?}, color {:?}",
            font.path.display(),
            font.size,
            font.matcher,
            font.color
        );
    }
    println!("  Default Color: {:?}", config.text.color);
    println!("  End Text: {:?}", config.text.end_text);
    println!();

    println!("Layout Settings:");
    println!("  Max X: {:?}", config.layout.max_x);
    println!("  Max Y: {:?}", config.layout.max_y);
    println!("  Max Lines: {:?}", config.layout.max_lines);
    println!("  Line Height: {:?}", config.layout.line_height);
    println!("  Wrap: {:?}", config.layout.wrap);
    println!();

    println!("Emoji Settings:");
    println!("  Enabled: {}", config.emoji.enabled);
    println!("  Source: {:?}", config.emoji.source);
    println!("  Directory: {:?}", config.emoji.directory);
    println!("  CDN: {}", config.emoji.cdn);
    println!("  Timeout: {}ms", config.emoji.timeout_ms);
    println!();

    match config.to_toml_string() {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{toml_str}");
        }
        Err(e) => eprintln!("Failed to serialize config: {e}"),
    }
}
