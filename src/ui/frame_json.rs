use crate::ui::frame::Frame;
use crate::ui::style::Color;

/// Serialize a frame for structural inspection. Used by tests to assert on
/// frame content without parsing ANSI output.
pub fn frame_to_json(frame: &Frame) -> serde_json::Value {
    let lines = frame
        .lines()
        .iter()
        .map(|line| {
            serde_json::Value::Array(
                line.iter()
                    .map(|span| {
                        serde_json::json!({
                            "text": span.text,
                            "style": {
                                "color": span.style.color.map(color_name),
                                "bold": span.style.bold,
                                "reverse": span.style.reverse,
                            }
                        })
                    })
                    .collect(),
            )
        })
        .collect();
    serde_json::Value::Array(lines)
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::DarkGrey => "dark_grey",
        Color::Yellow => "yellow",
        Color::Cyan => "cyan",
    }
}
