use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    config::MAX_FRAME_DURATION_MS,
    directive::model::{
        AnimationInstruction, Directive, OutputKind, OverlayText, PositionSpec, PresentationSpec,
        TextLanguage, TextOverlaySpec, VerticalAnchor,
    },
    directive::tables::{
        ANIMATED_TEXT_KEYWORDS, DIMENSION_PATTERNS, HINDI_KEYWORDS, MOTION_RULES, MOTION_VERBS,
        NAMED_CANVASES, NAMED_COLORS, POSITION_RULES, PRESENTATION_KEYWORDS, STILL_TEXT_KEYWORDS,
        STILLNESS_KEYWORDS, TEXT_COLORS, contains_any,
    },
    foundation::core::{Canvas, Rgb8, TagId},
};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(\w+)").expect("tag pattern"));

static DIMENSION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    DIMENSION_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("dimension pattern"))
        .collect()
});

static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rgb\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").expect("rgb pattern")
});

static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([0-9a-f]{6})").expect("hex pattern"));

static ORDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)order\s+@\w+(?:\s*,\s*@\w+)*(?:\s*,?\s*and\s*@\w+)?").expect("order pattern")
});

static SECONDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*seconds?").expect("seconds pattern"));

static QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("quoted pattern"));

static TEXT_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)text[:\s]+([^,.]+)").expect("text marker pattern"));

/// Compile a prompt into a [`Directive`].
///
/// Every rule is a case-insensitive keyword or pattern search over the whole prompt. Rules that
/// find nothing fall back to their documented default, so this never fails. `known_tags` is the
/// caller's tag list in insertion order; per-tag entries are only produced for tags in it.
#[tracing::instrument(level = "debug", skip_all, fields(output = ?output, tags = known_tags.len()))]
pub fn extract_directive(prompt: &str, known_tags: &[TagId], output: OutputKind) -> Directive {
    let lower = prompt.to_lowercase();
    let mentioned = mentioned_tags(prompt, known_tags);

    let presentation = match output {
        OutputKind::Animated if is_presentation_prompt(&lower) => Some(PresentationSpec {
            tag_order: extract_tag_order(prompt, known_tags),
            per_frame_duration_ms: extract_slide_duration_ms(&lower),
        }),
        _ => None,
    };

    let background = extract_background(&lower).unwrap_or(if presentation.is_some() {
        Rgb8::BLACK
    } else {
        Rgb8::WHITE
    });

    let per_tag_position = match output {
        OutputKind::Still => extract_positions(&lower, &mentioned),
        OutputKind::Animated => BTreeMap::new(),
    };

    let per_tag_animation = if output == OutputKind::Animated && presentation.is_none() {
        extract_animations(&lower, &mentioned)
    } else {
        BTreeMap::new()
    };

    let directive = Directive {
        output,
        canvas: extract_canvas(&lower),
        background,
        per_tag_position,
        per_tag_animation,
        text_overlay: extract_text_overlay(prompt, &lower, output),
        presentation,
    };
    tracing::debug!(
        canvas = ?directive.canvas,
        background = %directive.background.to_hex(),
        presentation = directive.is_presentation(),
        text = directive.text_overlay.is_some(),
        "directive extracted"
    );
    directive
}

/// Tags written as `@name` in the prompt, first appearance first, limited to `known_tags`.
pub fn mentioned_tags(prompt: &str, known_tags: &[TagId]) -> Vec<TagId> {
    let mut out = Vec::<TagId>::new();
    for caps in TAG_RE.captures_iter(prompt) {
        let name = &caps[1];
        if out.iter().any(|t| t.as_str() == name) {
            continue;
        }
        if let Some(known) = known_tags.iter().find(|t| t.as_str() == name) {
            out.push(known.clone());
        }
    }
    out
}

pub fn is_presentation_prompt(lower: &str) -> bool {
    contains_any(lower, &PRESENTATION_KEYWORDS)
}

/// First in-range explicit dimension, then the named canvas table, then 1080x1080.
pub fn extract_canvas(lower: &str) -> Canvas {
    for re in DIMENSION_RES.iter() {
        if let Some(canvas) = re.captures_iter(lower).find_map(|caps| canvas_from_captures(&caps))
        {
            return canvas;
        }
    }

    NAMED_CANVASES
        .iter()
        .find(|(name, _, _)| lower.contains(name))
        .map(|&(_, width, height)| Canvas { width, height })
        .unwrap_or(Canvas::DEFAULT)
}

fn canvas_from_captures(caps: &Captures<'_>) -> Option<Canvas> {
    let width = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let height = caps.get(2)?.as_str().parse::<u32>().ok()?;
    Canvas::new(width, height).ok()
}

/// Named color phrase, then `rgb(r, g, b)`, then `#rrggbb`. `None` means "use the path default".
pub fn extract_background(lower: &str) -> Option<Rgb8> {
    for (name, rgb) in NAMED_COLORS {
        if lower.contains(&format!("{name} background"))
            || lower.contains(&format!("background {name}"))
            || lower.contains(&format!("{name} color"))
        {
            return Some(rgb);
        }
    }

    if let Some(rgb) = RGB_RE.captures_iter(lower).find_map(|caps| {
        let r = caps[1].parse::<u8>().ok()?;
        let g = caps[2].parse::<u8>().ok()?;
        let b = caps[3].parse::<u8>().ok()?;
        Some(Rgb8::new(r, g, b))
    }) {
        return Some(rgb);
    }

    let caps = HEX_RE.captures(lower)?;
    let hex = &caps[1];
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb8::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Slide order: explicit `order @a, @b and @c`, else mention order, else caller order.
pub fn extract_tag_order(prompt: &str, known_tags: &[TagId]) -> Vec<TagId> {
    if let Some(m) = ORDER_RE.find(prompt) {
        let explicit: Vec<TagId> = TAG_RE
            .captures_iter(m.as_str())
            .filter_map(|caps| known_tags.iter().find(|t| t.as_str() == &caps[1]).cloned())
            .collect();
        if !explicit.is_empty() {
            return explicit;
        }
    }

    let mentioned = mentioned_tags(prompt, known_tags);
    if !mentioned.is_empty() {
        return mentioned;
    }
    known_tags.to_vec()
}

/// `<N> seconds` in milliseconds, clamped to what a GIF frame delay can encode.
fn extract_slide_duration_ms(lower: &str) -> Option<u32> {
    let caps = SECONDS_RE.captures(lower)?;
    let ms = caps[1]
        .parse::<u64>()
        .map_or(u64::MAX, |secs| secs.saturating_mul(1000));
    if ms > u64::from(MAX_FRAME_DURATION_MS) {
        tracing::warn!(
            requested_ms = ms,
            max_ms = MAX_FRAME_DURATION_MS,
            "slide duration exceeds the gif delay limit, clamping"
        );
        return Some(MAX_FRAME_DURATION_MS);
    }
    u32::try_from(ms).ok()
}

fn extract_animations(
    lower: &str,
    mentioned: &[TagId],
) -> BTreeMap<TagId, AnimationInstruction> {
    let mut instruction = AnimationInstruction::Static;
    if contains_any(lower, &MOTION_VERBS)
        && let Some((_, found)) = MOTION_RULES
            .iter()
            .find(|(keywords, _)| contains_any(lower, keywords))
    {
        instruction = *found;
    }
    if contains_any(lower, &STILLNESS_KEYWORDS) {
        instruction = AnimationInstruction::Static;
    }

    mentioned
        .iter()
        .map(|tag| (tag.clone(), instruction))
        .collect()
}

fn extract_positions(lower: &str, mentioned: &[TagId]) -> BTreeMap<TagId, PositionSpec> {
    let mut chosen = None;
    for (keywords, position) in POSITION_RULES {
        if contains_any(lower, keywords) {
            chosen = Some(position);
        }
    }

    let Some(position) = chosen else {
        return BTreeMap::new();
    };
    mentioned
        .iter()
        .map(|tag| (tag.clone(), position))
        .collect()
}

fn extract_text_overlay(prompt: &str, lower: &str, output: OutputKind) -> Option<TextOverlaySpec> {
    let (keywords, default_color): (&[&str], Rgb8) = match output {
        OutputKind::Still => (&STILL_TEXT_KEYWORDS[..], Rgb8::BLACK),
        OutputKind::Animated => (&ANIMATED_TEXT_KEYWORDS[..], Rgb8::WHITE),
    };
    if !contains_any(lower, keywords) {
        return None;
    }

    let content = extract_text_content(prompt)
        .map(OverlayText::Literal)
        .unwrap_or(OverlayText::Placeholder);

    let color = TEXT_COLORS
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|&(_, rgb)| rgb)
        .unwrap_or(default_color);

    let language = if contains_any(lower, &HINDI_KEYWORDS) || prompt.chars().any(is_devanagari) {
        TextLanguage::DevanagariScript
    } else {
        TextLanguage::Default
    };

    let vertical_anchor = if !lower.contains("text") {
        VerticalAnchor::Bottom
    } else if lower.contains("top") {
        VerticalAnchor::Top
    } else if lower.contains("center") {
        VerticalAnchor::Center
    } else {
        VerticalAnchor::Bottom
    };

    Some(TextOverlaySpec {
        content,
        color,
        language,
        vertical_anchor,
    })
}

/// Quoted substring, else the run after a `text:` / `text ` marker up to `,` or `.`.
pub fn extract_text_content(prompt: &str) -> Option<String> {
    if let Some(caps) = QUOTED_RE.captures(prompt) {
        return Some(caps[1].to_string());
    }
    let caps = TEXT_MARKER_RE.captures(prompt)?;
    let content = caps[1].trim();
    (!content.is_empty()).then(|| content.to_string())
}

fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

#[cfg(test)]
#[path = "../../tests/unit/directive/extract.rs"]
mod tests;
