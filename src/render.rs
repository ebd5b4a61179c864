use std::fmt::Write as _;

use crate::model::{MatchOutput, Pick, Probs};

pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Three-segment bar (`H`, `D`, `A`) whose widths follow the clamped percentages.
pub fn tri_bar(probs: &Probs, width: usize) -> String {
    let h = f64::from(probs.home.min(100));
    let d = f64::from(probs.draw.min(100));
    let a = f64::from(probs.away.min(100));
    let total = h + d + a;
    if total <= 0.0 {
        return format!("[{}]", " ".repeat(width));
    }

    let w = width as f64;
    let cut_home = (((h / total) * w).round() as usize).min(width);
    let cut_draw = ((((h + d) / total) * w).round() as usize).clamp(cut_home, width);
    format!(
        "[{}{}{}]",
        "H".repeat(cut_home),
        "D".repeat(cut_draw - cut_home),
        "A".repeat(width - cut_draw)
    )
}

pub fn pick_label(out: &MatchOutput) -> &str {
    match out.pick {
        Pick::Home => out.home_team.as_str(),
        Pick::Away => out.away_team.as_str(),
        Pick::Draw => "Draw",
    }
}

pub fn render_match(out: &MatchOutput, width: usize) -> String {
    let mut s = String::new();
    match &out.id {
        Some(id) => {
            let _ = writeln!(s, "#{id} {} vs {}", out.home_team, out.away_team);
        }
        None => {
            let _ = writeln!(s, "{} vs {}", out.home_team, out.away_team);
        }
    }
    let _ = writeln!(s, "  {}", tri_bar(&out.probs, width));
    let _ = writeln!(
        s,
        "  Home {}%  Draw {}%  Away {}%",
        out.probs.home, out.probs.draw, out.probs.away
    );
    let _ = writeln!(s, "  Pick: {}", pick_label(out));
    for note in &out.notes {
        let _ = writeln!(s, "  - {note}");
    }
    s
}

pub fn render_round(outputs: &[MatchOutput], width: usize) -> String {
    if outputs.is_empty() {
        return "No matches in round.\n".to_string();
    }
    outputs
        .iter()
        .map(|o| render_match(o, width))
        .collect::<Vec<_>>()
        .join("\n")
}
