//! Function-level value rewrites: `calc()`/`min()`/`max()` whitespace
//! removal, gradient colour-stop rewriting and transform function merging.

use crate::color;
use crate::number;
use crate::split::{split_outside, split_ws};

/// Drop a leading `-vendor-` prefix from a property or function name.
pub fn strip_vendor(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('-') {
        if let Some(idx) = rest.find('-') {
            return &rest[idx + 1..];
        }
    }
    name
}

const CALC_HEADS: &[&str] = &["calc(", "min(", "max("];

/// Strip the spaces out of a `calc()`, `min()` or `max()` value, keeping
/// the head and the top-level comma structure. Anything else passes
/// through.
pub fn compress_calc(value: &str) -> String {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    let head_len = match CALC_HEADS.iter().find(|h| lower.starts_with(**h)) {
        Some(head) => head.len(),
        None => return value.to_string(),
    };
    if !trimmed.ends_with(')') {
        return value.to_string();
    }

    let head = &trimmed[..head_len];
    let inner = &trimmed[head_len..trimmed.len() - 1];
    let parts: Vec<String> = split_outside(',', inner)
        .iter()
        .map(|p| p.chars().filter(|c| !c.is_whitespace()).collect())
        .collect();
    format!("{}{})", head, parts.join(","))
}

/// Supported gradient heads and how many leading comma segments are
/// geometry rather than colour stops.
const GRADIENT_HEADS: &[(&str, usize)] = &[
    ("linear-gradient", 1),
    ("repeating-linear-gradient", 1),
    ("radial-gradient", 2),
    ("repeating-radial-gradient", 2),
];

/// Rewrite the leading colour of every colour-stop segment in a supported
/// gradient function. The head, vendor prefix included, and the segment
/// count are preserved; unsupported values pass through.
pub fn compress_gradient_colors(value: &str) -> String {
    let trimmed = value.trim();
    let open = match trimmed.find('(') {
        Some(idx) => idx,
        None => return value.to_string(),
    };
    if !trimmed.ends_with(')') {
        return value.to_string();
    }

    let head = &trimmed[..open];
    let head_lower = head.to_ascii_lowercase();
    let base = strip_vendor(&head_lower);
    let skip = match GRADIENT_HEADS.iter().find(|(h, _)| *h == base) {
        Some((_, skip)) => *skip,
        None => return value.to_string(),
    };

    let inner = &trimmed[open + 1..trimmed.len() - 1];
    let segments: Vec<String> = split_outside(',', inner)
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let seg = seg.trim();
            if i < skip {
                return seg.to_string();
            }
            let mut parts = split_ws(seg);
            if let Some(first) = parts.first_mut() {
                *first = color::optimise(first);
            }
            parts.join(" ")
        })
        .collect();
    format!("{}({})", head, segments.join(","))
}

/// Transform functions the merger understands, in canonical spelling.
const TRANSFORM_FUNCTIONS: &[&str] = &[
    "matrix",
    "matrix3d",
    "translate",
    "translate3d",
    "translateX",
    "translateY",
    "translateZ",
    "scale",
    "scale3d",
    "scaleX",
    "scaleY",
    "scaleZ",
    "rotate",
    "rotate3d",
    "rotateX",
    "rotateY",
    "rotateZ",
    "skew",
    "skewX",
    "skewY",
    "perspective",
];

#[derive(Debug)]
enum TransformItem {
    Func { name: String, args: Vec<String> },
    Raw(String),
}

/// Normalise a transform list and merge axis variants: `scaleX/Y/Z` and
/// `translateX/Y/Z` combine into the 3d form, then remaining `X`+`Y`
/// pairs of skew/scale/translate/rotate combine into the two-argument
/// form. Items stay in source order; unrecognised functions pass through
/// untouched. A merge is skipped when a participating name occurs more
/// than once, since transform application order is significant.
pub fn merge_transforms(value: &str) -> String {
    let mut items: Vec<Option<TransformItem>> = split_ws(value)
        .into_iter()
        .map(|token| Some(parse_function(&token)))
        .collect();

    for base in ["scale", "translate"] {
        merge_axes(&mut items, base, true);
    }
    for base in ["skew", "scale", "translate", "rotate"] {
        merge_axes(&mut items, base, false);
    }

    let rendered: Vec<String> = items
        .into_iter()
        .flatten()
        .map(|item| match item {
            TransformItem::Raw(raw) => raw,
            TransformItem::Func { name, args } => format!("{}({})", name, args.join(",")),
        })
        .collect();
    rendered.join(" ")
}

fn parse_function(token: &str) -> TransformItem {
    let open = match token.find('(') {
        Some(idx) => idx,
        None => return TransformItem::Raw(token.to_string()),
    };
    if !token.ends_with(')') {
        return TransformItem::Raw(token.to_string());
    }
    let raw_name = &token[..open];
    let name = match TRANSFORM_FUNCTIONS
        .iter()
        .find(|f| f.eq_ignore_ascii_case(raw_name))
    {
        Some(canonical) => canonical.to_string(),
        None => return TransformItem::Raw(token.to_string()),
    };
    let inner = &token[open + 1..token.len() - 1];
    let args = split_outside(',', inner)
        .iter()
        .map(|a| number::optimise(None, a.trim()))
        .collect();
    TransformItem::Func { name, args }
}

fn merge_axes(items: &mut [Option<TransformItem>], base: &str, three_d: bool) {
    let suffixes: &[&str] = if three_d { &["X", "Y", "Z"] } else { &["X", "Y"] };

    let mut positions = Vec::with_capacity(suffixes.len());
    for suffix in suffixes {
        let name = format!("{}{}", base, suffix);
        let found: Vec<usize> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| match item {
                Some(TransformItem::Func { name: n, .. }) if *n == name => Some(i),
                _ => None,
            })
            .collect();
        if found.len() != 1 {
            return;
        }
        positions.push(found[0]);
    }

    let mut args = Vec::with_capacity(positions.len());
    for &pos in &positions {
        match &items[pos] {
            Some(TransformItem::Func { args: a, .. }) if a.len() == 1 => {
                args.push(a[0].clone());
            }
            _ => return,
        }
    }

    let target = *positions.iter().min().unwrap();
    for &pos in &positions {
        items[pos] = None;
    }
    let name = if three_d {
        format!("{}3d", base)
    } else {
        base.to_string()
    };
    items[target] = Some(TransformItem::Func { name, args });
}
