use askama::Template;
use validator::Validate;

use crate::{
    constants::DEFAULT_ACCENT_COLOR,
    entities::social_card::{CardFormat, SocialCardRequest},
    errors::AppError,
};

struct TextLine {
    y: u32,
    text: String,
}

#[derive(Template)]
#[template(path = "social_card.svg", escape = "html")]
struct SocialCardTemplate {
    width: u32,
    height: u32,
    margin: u32,
    stripe_width: u32,
    orb_x: u32,
    orb_y: u32,
    orb_radius: u32,
    background: &'static str,
    foreground: &'static str,
    muted: &'static str,
    accent: String,
    code: Option<String>,
    code_y: u32,
    code_size: u32,
    title_lines: Vec<TextLine>,
    title_size: u32,
    subtitle_lines: Vec<TextLine>,
    subtitle_size: u32,
}

/// Renders the share card as an SVG document.
pub fn render_social_card(mut request: SocialCardRequest) -> Result<String, AppError> {
    request.title = request.title.trim().to_string();
    request.validate()?;

    let (width, height) = request.format.dimensions();
    let (title_size, subtitle_size, code_size, title_chars, subtitle_chars) = match request.format {
        CardFormat::Og => (64, 30, 22, 28, 60),
        CardFormat::Square => (72, 32, 24, 22, 48),
    };
    let margin = 80;

    let code = request
        .project_code
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    let code_y = margin + code_size;

    let mut y = code_y + title_size + 24;
    let title_lines = lay_out(&wrap_text(&request.title, title_chars, 3), &mut y, title_size + 12);

    y += 16;
    let subtitle = request.subtitle.as_deref().map(str::trim).unwrap_or_default();
    let subtitle_lines = lay_out(&wrap_text(subtitle, subtitle_chars, 3), &mut y, subtitle_size + 10);

    let template = SocialCardTemplate {
        width,
        height,
        margin,
        stripe_width: 16,
        orb_x: width - width / 6,
        orb_y: height / 2,
        orb_radius: height.min(width) / 4,
        background: request.theme.background(),
        foreground: request.theme.foreground(),
        muted: request.theme.muted(),
        accent: request
            .accent_color
            .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
        code,
        code_y,
        code_size,
        title_lines,
        title_size,
        subtitle_lines,
        subtitle_size,
    };

    Ok(template.render()?)
}

fn lay_out(lines: &[String], y: &mut u32, step: u32) -> Vec<TextLine> {
    lines
        .iter()
        .map(|text| {
            let line = TextLine { y: *y, text: text.clone() };
            *y += step;
            line
        })
        .collect()
}

/// Greedy word wrap by character count. Overlong words are split and text
/// past `max_lines` is cut with an ellipsis.
fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();

        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(width.saturating_sub(1));
            *last = chars.into_iter().collect::<String>().trim_end().to_string() + "…";
        }
    }
    lines
}
