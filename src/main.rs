use std::time::Instant;

use anyhow::{Context, Result};
use image::Rgba;
use powertext::{Point, PowerText, PowerTextConfig, RasterCanvas};

const SAMPLE: &str = "皆さん✨、我在インターネット上看到someone把几国language混在一起speak🌍。\
我看到之后be like：それは我じゃないか！😂 私もtry一tryです🎉。\
虽然是混乱している句子ですけど、中文日本語プラスEnglish、挑戦スタート🚀！

我study📖日本語的时候，もし有汉字，我会很happy😊。\
But 我hate😤外来語、什么マクドナルド🍔、スターバックス☕、グーグル🔍、ディズニーランド🏰、\
根本记不住カタカナhow to写、太難しい😭。

以上です✌️，byebye👋！";

fn main() -> Result<()> {
    env_logger::init();

    let config = PowerTextConfig::load();
    let renderer = PowerText::from_config(&config).context("configuring renderer")?;

    let demo = &config.demo;
    let [r, g, b] = demo.background;
    let mut canvas = RasterCanvas::new(demo.width, demo.height, Rgba([r, g, b, 255]));
    let origin = Point::new(demo.origin[0], demo.origin[1]);

    if demo.guides {
        let guide = Rgba([0, 0, 0, 255]);
        if let Some(max_x) = config.layout.max_x {
            canvas.vline((origin.x + max_x).round() as u32, 0, demo.height, guide);
        }
        if let Some(max_y) = config.layout.max_y {
            canvas.hline((origin.y + max_y).round() as u32, 0, demo.width, guide);
        }
    }

    let text = demo.text.as_deref().unwrap_or(SAMPLE);
    let started = Instant::now();
    let layout = renderer
        .draw(&mut canvas, origin, text)
        .context("drawing text")?;
    tracing::info!(
        lines = layout.lines.len(),
        truncated = layout.truncated,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "rendered"
    );

    canvas
        .save(&demo.output)
        .with_context(|| format!("saving {}", demo.output.display()))?;
    println!("wrote {}", demo.output.display());
    Ok(())
}
