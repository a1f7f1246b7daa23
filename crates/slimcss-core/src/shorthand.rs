//! Shorthand registry plus the two halves of shorthand handling:
//! dissolving shorthand declarations into longhands, and merging longhand
//! sets back into shorthands once the value engine has normalised them.

use crate::ast::{is_important, strip_important, PropertyMap, IMPORTANT};
use crate::config::ShorthandLevel;
use crate::split::{split_outside, split_ws};
use log::{debug, info};

/// Four-value box shorthands with their longhands in
/// top/right/bottom/left order.
pub const BOX_SHORTHANDS: &[(&str, [&str; 4])] = &[
    (
        "margin",
        ["margin-top", "margin-right", "margin-bottom", "margin-left"],
    ),
    (
        "padding",
        ["padding-top", "padding-right", "padding-bottom", "padding-left"],
    ),
    (
        "border-color",
        [
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
    ),
    (
        "border-style",
        [
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
        ],
    ),
    (
        "border-width",
        [
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
    ),
];

/// `border-radius` corner longhands in top-left/top-right/bottom-right/
/// bottom-left order. The shorthand is never dissolved (its `h / v`
/// syntax cannot ride the four-value expansion) but corners merge back
/// when every corner holds a single radius.
pub const RADIUS_LONGHANDS: [&str; 4] = [
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-right-radius",
    "border-bottom-left-radius",
];

/// Two-value paired shorthands.
pub const PAIR_SHORTHANDS: &[(&str, [&str; 2])] = &[
    ("overflow", ["overflow-x", "overflow-y"]),
    ("pause", ["pause-before", "pause-after"]),
    ("rest", ["rest-before", "rest-after"]),
    ("cue", ["cue-before", "cue-after"]),
];

/// Background longhands and their initial values, in merge order.
pub const BACKGROUND_DEFAULTS: &[(&str, &str)] = &[
    ("background-image", "none"),
    ("background-size", "auto"),
    ("background-repeat", "repeat"),
    ("background-position", "0 0"),
    ("background-attachment", "scroll"),
    ("background-clip", "border"),
    ("background-origin", "padding"),
    ("background-color", "transparent"),
];

/// Font longhands and their initial values, in merge order.
pub const FONT_DEFAULTS: &[(&str, &str)] = &[
    ("font-style", "normal"),
    ("font-variant", "normal"),
    ("font-weight", "normal"),
    ("font-size", ""),
    ("line-height", ""),
    ("font-family", ""),
];

pub fn is_box_shorthand(property: &str) -> bool {
    BOX_SHORTHANDS.iter().any(|(s, _)| *s == property)
}

pub fn attach_important(value: String, important: bool) -> String {
    if important && !value.is_empty() {
        format!("{}{}", value, IMPORTANT)
    } else {
        value
    }
}

// ---------------------------------------------------------------------
// Dissolver
// ---------------------------------------------------------------------

/// Replace shorthand declarations by their longhand sets. The shorthand's
/// slot is cleared to an empty sentinel so a later merge can reuse its
/// position; longhands overwrite existing entries in place (last write
/// wins). Font and background expansion are gated by level.
pub fn dissolve(props: &mut PropertyMap, level: ShorthandLevel) {
    let names: Vec<String> = props.iter().map(|d| d.property.clone()).collect();
    for name in names {
        let value = match props.get(&name) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => continue,
        };

        if let Some((_, longhands)) = BOX_SHORTHANDS.iter().find(|(s, _)| *s == name) {
            let expanded = expand_four_value(longhands, &value);
            if expanded.is_empty() {
                continue;
            }
            props.set(&name, "");
            for (prop, val) in expanded {
                props.set(&prop, val);
            }
            info!("dissolved {} into its longhands", name);
        } else if name == "font" && level >= ShorthandLevel::Font {
            props.set("font", "");
            for (prop, val) in dissolve_font(&value) {
                props.set(&prop, val);
            }
            info!("dissolved font into its longhands");
        } else if name == "background" && level >= ShorthandLevel::Background {
            match dissolve_background(&value) {
                Some(expanded) => {
                    props.set("background", "");
                    for (prop, val) in expanded {
                        props.set(&prop, val);
                    }
                    info!("dissolved background into its longhands");
                }
                None => debug!("background contains a gradient, kept verbatim"),
            }
        }
    }
}

/// Expand a four-value shorthand value to its longhands. An importance
/// marker is re-attached to every produced longhand.
pub fn expand_four_value(longhands: &[&str; 4], value: &str) -> Vec<(String, String)> {
    let important = is_important(value);
    let parts = split_ws(strip_important(value));
    if parts.is_empty() {
        return Vec::new();
    }
    let four = expand_to_four(&parts);
    longhands
        .iter()
        .zip(four)
        .map(|(prop, val)| (prop.to_string(), attach_important(val, important)))
        .collect()
}

fn expand_to_four(parts: &[String]) -> [String; 4] {
    let idx = match parts.len() {
        1 => [0, 0, 0, 0],
        2 => [0, 1, 0, 1],
        3 => [0, 1, 2, 1],
        4 => [0, 1, 2, 3],
        // tolerant fallback for malformed arity
        _ => [0, 0, 0, 0],
    };
    idx.map(|i| parts[i].clone())
}

const FONT_WEIGHTS: &[&str] = &[
    "normal", "bold", "bolder", "lighter", "100", "200", "300", "400", "500", "600", "700", "800",
    "900",
];
const FONT_VARIANTS: &[&str] = &["normal", "small-caps"];
const FONT_STYLES: &[&str] = &["normal", "italic", "oblique"];

/// Expand a `font` shorthand. Tokens of the first comma segment are
/// absorbed greedily, each slot at most once; leftover tokens accumulate
/// into the family. Missing longhands fall back to the defaults table.
pub fn dissolve_font(value: &str) -> Vec<(String, String)> {
    let important = is_important(value);
    let segments = split_outside(',', strip_important(value));

    let mut style: Option<String> = None;
    let mut variant: Option<String> = None;
    let mut weight: Option<String> = None;
    let mut size: Option<String> = None;
    let mut line_height: Option<String> = None;
    let mut family_words: Vec<String> = Vec::new();

    let first = segments.first().map(String::as_str).unwrap_or("");
    for token in split_ws(first) {
        let lower = token.to_ascii_lowercase();
        if weight.is_none() && FONT_WEIGHTS.contains(&lower.as_str()) {
            weight = Some(token);
        } else if variant.is_none() && FONT_VARIANTS.contains(&lower.as_str()) {
            variant = Some(token);
        } else if style.is_none() && FONT_STYLES.contains(&lower.as_str()) {
            style = Some(token);
        } else if size.is_none() && token.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            match token.split_once('/') {
                Some((sz, lh)) => {
                    size = Some(sz.to_string());
                    if !lh.is_empty() {
                        line_height = Some(lh.to_string());
                    }
                }
                None => size = Some(token),
            }
        } else {
            family_words.push(token);
        }
    }

    let mut family = family_words.join(" ");
    if family_words.len() > 1 && !family.starts_with('"') && !family.starts_with('\'') {
        family = format!("\"{}\"", family);
    }
    for segment in segments.iter().skip(1) {
        family.push(',');
        family.push_str(segment.trim());
    }

    // A lone numeric token was absorbed as a weight; without a size it
    // must have been the size.
    if size.is_none() {
        if let Some(w) = &weight {
            if w.parse::<u32>().is_ok() {
                size = weight.take();
            }
        }
    }

    FONT_DEFAULTS
        .iter()
        .map(|(prop, default)| {
            let chosen = match *prop {
                "font-style" => style.take(),
                "font-variant" => variant.take(),
                "font-weight" => weight.take(),
                "font-size" => size.take(),
                "line-height" => line_height.take(),
                "font-family" if !family.is_empty() => Some(std::mem::take(&mut family)),
                _ => None,
            };
            let value = chosen.unwrap_or_else(|| default.to_string());
            (prop.to_string(), attach_important(value, important))
        })
        .collect()
}

const BG_REPEATS: &[&str] = &["repeat", "repeat-x", "repeat-y", "no-repeat", "space"];
const BG_ATTACHMENTS: &[&str] = &["scroll", "fixed", "local"];
const BG_POSITIONS: &[&str] = &["top", "center", "bottom", "left", "right"];

/// Expand a `background` shorthand, one comma layer at a time. Returns
/// None when the value carries a gradient; the caller keeps the shorthand
/// verbatim in that case.
pub fn dissolve_background(value: &str) -> Option<Vec<(String, String)>> {
    if value.to_ascii_lowercase().contains("gradient(") {
        return None;
    }

    let important = is_important(value);
    let mut image: Vec<String> = Vec::new();
    let mut size: Vec<String> = Vec::new();
    let mut repeat: Vec<String> = Vec::new();
    let mut position: Vec<String> = Vec::new();
    let mut attachment: Vec<String> = Vec::new();
    let mut clip: Vec<String> = Vec::new();
    let mut origin: Vec<String> = Vec::new();
    let mut color: Vec<String> = Vec::new();

    for layer in split_outside(',', strip_important(value)) {
        let mut have_image = false;
        let mut have_clip = false;
        let mut have_color = false;
        let mut position_parts: Vec<String> = Vec::new();

        for token in split_ws(layer.trim()) {
            let lower = token.to_ascii_lowercase();
            if !have_image && (lower.starts_with("url(") || lower == "none") {
                image.push(token);
                have_image = true;
            } else if BG_REPEATS.contains(&lower.as_str()) {
                repeat.push(token);
            } else if BG_ATTACHMENTS.contains(&lower.as_str()) {
                attachment.push(token);
            } else if (lower == "border" || lower == "padding") && !have_clip {
                clip.push(token);
                have_clip = true;
            } else if lower == "border" || lower == "padding" || lower == "content" {
                origin.push(token);
            } else if token.starts_with('(') {
                let inner = token.trim_start_matches('(').trim_end_matches(')');
                size.push(inner.to_string());
            } else if BG_POSITIONS.contains(&lower.as_str())
                || token.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-')
            {
                position_parts.push(token);
            } else if !have_color {
                color.push(token);
                have_color = true;
            }
        }

        if !position_parts.is_empty() {
            position.push(position_parts.join(" "));
        }
    }

    let mut accumulated = [
        image, size, repeat, position, attachment, clip, origin, color,
    ];
    let result = BACKGROUND_DEFAULTS
        .iter()
        .zip(accumulated.iter_mut())
        .map(|((prop, default), contributions)| {
            let value = if contributions.is_empty() {
                default.to_string()
            } else {
                contributions.join(",")
            };
            (prop.to_string(), attach_important(value, important))
        })
        .collect();
    Some(result)
}

// ---------------------------------------------------------------------
// Merger
// ---------------------------------------------------------------------

/// Merge complete four-value longhand sets back into their shorthands,
/// including the safe single-radius corner merge.
pub fn merge_four_value(props: &mut PropertyMap) {
    for (shorthand, longhands) in BOX_SHORTHANDS {
        merge_box(props, shorthand, longhands);
    }
    merge_radius(props);
}

fn merge_box(props: &mut PropertyMap, shorthand: &str, longhands: &[&str; 4]) {
    let Some((values, important)) = gather_uniform(props, longhands) else {
        return;
    };
    let four: [String; 4] = values.try_into().unwrap_or_else(|_| unreachable!());
    let merged = compress_four(&four);
    for longhand in longhands {
        props.remove(longhand);
    }
    props.set(shorthand, attach_important(merged, important));
    info!("merged longhands into {}", shorthand);
}

fn merge_radius(props: &mut PropertyMap) {
    let Some((values, important)) = gather_uniform(props, &RADIUS_LONGHANDS) else {
        return;
    };
    // corners carrying `h v` pairs cannot be expressed without the
    // slash syntax, leave them alone
    if values.iter().any(|v| split_ws(v).len() != 1) {
        return;
    }
    let four: [String; 4] = values.try_into().unwrap_or_else(|_| unreachable!());
    let merged = compress_four(&four);
    for longhand in &RADIUS_LONGHANDS {
        props.remove(longhand);
    }
    props.set("border-radius", attach_important(merged, important));
    info!("merged corner radii into border-radius");
}

/// Collect the stripped values of a complete longhand group whose
/// importance flags agree. Returns None when any longhand is missing or
/// the flags conflict (the merge is skipped in both cases).
fn gather_uniform(props: &PropertyMap, longhands: &[&str]) -> Option<(Vec<String>, bool)> {
    let mut values = Vec::with_capacity(longhands.len());
    let mut important: Option<bool> = None;
    for longhand in longhands {
        let raw = props.get(longhand).filter(|v| !v.is_empty())?;
        let flag = is_important(raw);
        match important {
            None => important = Some(flag),
            Some(prev) if prev != flag => return None,
            _ => {}
        }
        values.push(strip_important(raw).to_string());
    }
    Some((values, important.unwrap_or(false)))
}

/// Compress a top/right/bottom/left 4-tuple to its shortest spelling.
pub fn compress_four(v: &[String; 4]) -> String {
    let [top, right, bottom, left] = v;
    if top == right && top == bottom && top == left {
        top.clone()
    } else if top == bottom && left == right {
        format!("{} {}", top, right)
    } else if left == right {
        format!("{} {} {}", top, right, bottom)
    } else {
        format!("{} {} {} {}", top, right, bottom, left)
    }
}

/// Compress the whitespace-separated tuple of a four-value shorthand
/// value in place, without dissolving. Idempotent; values with more than
/// four members come back unchanged.
pub fn compress_shorthand_value(value: &str) -> String {
    let important = is_important(value);
    let parts = split_ws(strip_important(value));
    if parts.is_empty() || parts.len() > 4 {
        return value.to_string();
    }
    let merged = compress_four(&expand_to_four(&parts));
    attach_important(merged, important)
}

/// Compress a `border-radius` value: each side of a top-level `/` is a
/// 4-tuple of its own. More than two parts is malformed and passes
/// through.
pub fn compress_radius_value(value: &str) -> String {
    let important = is_important(value);
    let halves = split_outside('/', strip_important(value));
    if halves.is_empty() || halves.len() > 2 {
        return value.to_string();
    }
    let compressed: Vec<String> = halves
        .iter()
        .map(|half| {
            let parts = split_ws(half);
            if parts.is_empty() || parts.len() > 4 {
                half.trim().to_string()
            } else {
                compress_four(&expand_to_four(&parts))
            }
        })
        .collect();
    attach_important(compressed.join(" / "), important)
}

/// Merge the registered two-value pairs. Both longhands must be present
/// and agree on importance; equal halves collapse to a single value.
pub fn merge_pairs(props: &mut PropertyMap) {
    for (shorthand, longhands) in PAIR_SHORTHANDS {
        let Some((values, important)) = gather_uniform(props, longhands) else {
            continue;
        };
        let merged = if values[0] == values[1] {
            values[0].clone()
        } else {
            format!("{} {}", values[0], values[1])
        };
        for longhand in longhands {
            props.remove(longhand);
        }
        props.set(shorthand, attach_important(merged, important));
        info!("merged longhands into {}", shorthand);
    }
}

/// Merge font longhands into `font`. Only attempted when a size is set;
/// default-equal longhands are treated as absent, and a `font-variant`
/// other than `small-caps` survives as its own declaration.
pub fn merge_font(props: &mut PropertyMap) {
    if !props.is_set("font-size") {
        return;
    }

    let mut important: Option<bool> = None;
    let mut preserve_variant = false;
    let mut assembled = String::new();

    for (prop, default) in FONT_DEFAULTS {
        let Some(raw) = props.get(prop).filter(|v| !v.is_empty()) else {
            continue;
        };
        let flag = is_important(raw);
        let value = strip_important(raw).to_string();
        if is_font_default(prop, default, &value) {
            continue;
        }
        if *prop == "font-variant" && !value.eq_ignore_ascii_case("small-caps") {
            preserve_variant = true;
            continue;
        }
        match important {
            None => important = Some(flag),
            Some(prev) if prev != flag => return,
            _ => {}
        }
        if *prop == "line-height" {
            assembled.push('/');
        } else if !assembled.is_empty() {
            assembled.push(' ');
        }
        assembled.push_str(&value);
    }

    if assembled.is_empty() {
        return;
    }
    for (prop, _) in FONT_DEFAULTS {
        if *prop == "font-variant" && preserve_variant {
            continue;
        }
        props.remove(prop);
    }
    props.set("font", attach_important(assembled, important.unwrap_or(false)));
    info!("merged longhands into font");
}

/// Default equality for font longhands. `400` is the numeric spelling of
/// the initial weight, so it counts as default too.
fn is_font_default(prop: &str, default: &str, value: &str) -> bool {
    value == default || (prop == "font-weight" && value == "400" && default == "normal")
}

/// Merge background longhands into `background`, layer by layer.
pub fn merge_background(props: &mut PropertyMap) {
    if props.is_set("background") {
        return;
    }
    for (prop, _) in BACKGROUND_DEFAULTS {
        if let Some(v) = props.get(prop) {
            if v.to_ascii_lowercase().contains("gradient(") {
                return;
            }
        }
    }

    let mut important: Option<bool> = None;
    for (prop, _) in BACKGROUND_DEFAULTS {
        if let Some(raw) = props.get(prop).filter(|v| !v.is_empty()) {
            let flag = is_important(raw);
            match important {
                None => important = Some(flag),
                Some(prev) if prev != flag => return,
                _ => {}
            }
        }
    }
    let important = important.unwrap_or(false);

    let segment_count = |prop: &str| {
        props
            .get(prop)
            .filter(|v| !v.is_empty())
            .map(|v| split_outside(',', strip_important(v)).len())
            .unwrap_or(0)
    };
    let layers = segment_count("background-image")
        .max(segment_count("background-color"))
        .max(1);

    let image_segments: Vec<String> = props
        .get("background-image")
        .map(|v| {
            split_outside(',', strip_important(v))
                .iter()
                .map(|s| s.trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut assembled_layers: Vec<String> = Vec::new();
    for i in 0..layers {
        let image_missing = image_segments
            .get(i)
            .map(|s| s.eq_ignore_ascii_case("none"))
            .unwrap_or(true);

        let mut layer = String::new();
        for (prop, default) in BACKGROUND_DEFAULTS {
            let Some(raw) = props.get(prop).filter(|v| !v.is_empty()) else {
                continue;
            };
            let segments = split_outside(',', strip_important(raw));
            let Some(segment) = segments.get(i) else {
                continue;
            };
            let segment = segment.trim();
            if segment == *default {
                continue;
            }
            let layer_scoped = matches!(
                *prop,
                "background-size"
                    | "background-position"
                    | "background-attachment"
                    | "background-repeat"
            );
            if layer_scoped && image_missing {
                continue;
            }
            if !layer.is_empty() {
                layer.push(' ');
            }
            if *prop == "background-size" {
                layer.push('(');
                layer.push_str(segment);
                layer.push(')');
            } else {
                layer.push_str(segment);
            }
        }
        assembled_layers.push(layer);
    }

    let assembled = assembled_layers
        .join(",")
        .trim_matches(|c| c == ',' || c == ' ')
        .to_string();

    if !assembled.is_empty() {
        for (prop, _) in BACKGROUND_DEFAULTS {
            props.remove(prop);
        }
        props.set("background", attach_important(assembled, important));
        info!("merged longhands into background");
    } else if props.contains("background") {
        for (prop, _) in BACKGROUND_DEFAULTS {
            props.remove(prop);
        }
        props.set("background", attach_important("none".to_string(), important));
        info!("background collapsed to none");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> PropertyMap {
        let mut props = PropertyMap::new();
        for (prop, value) in pairs {
            props.set(prop, *value);
        }
        props
    }

    #[test]
    fn four_value_expansion_arities() {
        let longhands = &BOX_SHORTHANDS[0].1;
        let one = expand_four_value(longhands, "1px");
        assert!(one.iter().all(|(_, v)| v == "1px"));

        let two = expand_four_value(longhands, "1px 2px");
        assert_eq!(two[0].1, "1px");
        assert_eq!(two[1].1, "2px");
        assert_eq!(two[2].1, "1px");
        assert_eq!(two[3].1, "2px");

        let three = expand_four_value(longhands, "1px 2px 3px");
        assert_eq!(three[2].1, "3px");
        assert_eq!(three[3].1, "2px");
    }

    #[test]
    fn four_value_expansion_keeps_importance() {
        let longhands = &BOX_SHORTHANDS[0].1;
        let out = expand_four_value(longhands, "1px !important");
        assert!(out.iter().all(|(_, v)| v == "1px!important"));
    }

    #[test]
    fn compress_tuple_cases() {
        assert_eq!(compress_shorthand_value("1px 1px 1px 1px"), "1px");
        assert_eq!(compress_shorthand_value("1px 2px 1px 2px"), "1px 2px");
        assert_eq!(compress_shorthand_value("1px 2px 3px 2px"), "1px 2px 3px");
        assert_eq!(
            compress_shorthand_value("1px 2px 3px 4px"),
            "1px 2px 3px 4px"
        );
        assert_eq!(compress_shorthand_value("1px 2px 3px 4px 5px"), "1px 2px 3px 4px 5px");
    }

    #[test]
    fn compress_tuple_is_idempotent() {
        let once = compress_shorthand_value("2em 3em 2em 3em");
        assert_eq!(compress_shorthand_value(&once), once);
    }

    #[test]
    fn radius_value_compression() {
        assert_eq!(
            compress_radius_value("5px 5px 5px 5px / 10px 10px 10px 10px"),
            "5px / 10px"
        );
        assert_eq!(compress_radius_value("5px 10px 5px 10px"), "5px 10px");
        assert_eq!(
            compress_radius_value("1px / 2px / 3px"),
            "1px / 2px / 3px"
        );
    }

    #[test]
    fn merge_skips_on_importance_mismatch() {
        let mut props = map(&[
            ("margin-top", "1px!important"),
            ("margin-right", "1px"),
            ("margin-bottom", "1px"),
            ("margin-left", "1px"),
        ]);
        merge_four_value(&mut props);
        assert!(!props.contains("margin"));
        assert_eq!(props.get("margin-top"), Some("1px!important"));
    }

    #[test]
    fn merge_requires_all_four() {
        let mut props = map(&[
            ("margin-top", "1px"),
            ("margin-right", "1px"),
            ("margin-bottom", "1px"),
        ]);
        merge_four_value(&mut props);
        assert!(!props.contains("margin"));
    }

    #[test]
    fn pair_merge_collapses_equal_values() {
        let mut props = map(&[("pause-before", "weak"), ("pause-after", "weak")]);
        merge_pairs(&mut props);
        assert_eq!(props.get("pause"), Some("weak"));
        assert!(!props.contains("pause-before"));
    }

    #[test]
    fn font_dissolve_and_merge_round_trip() {
        let dissolved = dissolve_font("italic bold 12px/1.5 Arial, sans-serif");
        let mut props = PropertyMap::new();
        for (prop, value) in dissolved {
            props.set(&prop, value);
        }
        assert_eq!(props.get("font-style"), Some("italic"));
        assert_eq!(props.get("font-weight"), Some("bold"));
        assert_eq!(props.get("font-size"), Some("12px"));
        assert_eq!(props.get("line-height"), Some("1.5"));
        assert_eq!(props.get("font-family"), Some("Arial,sans-serif"));

        merge_font(&mut props);
        assert_eq!(
            props.get("font"),
            Some("italic bold 12px/1.5 Arial,sans-serif")
        );
        assert!(!props.contains("font-size"));
    }

    #[test]
    fn font_multi_word_family_is_quoted() {
        let dissolved = dissolve_font("12px Times New Roman");
        let family = dissolved
            .iter()
            .find(|(p, _)| p == "font-family")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(family, "\"Times New Roman\"");
    }

    #[test]
    fn font_numeric_weight_reinterpreted_as_size() {
        let dissolved = dissolve_font("300 serif");
        let get = |name: &str| {
            dissolved
                .iter()
                .find(|(p, _)| p == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("font-size"), "300");
        assert_eq!(get("font-weight"), "normal");
    }

    #[test]
    fn font_variant_is_preserved_when_not_small_caps() {
        let mut props = map(&[
            ("font-variant", "titling-caps"),
            ("font-size", "12px"),
            ("font-family", "serif"),
        ]);
        merge_font(&mut props);
        assert_eq!(props.get("font"), Some("12px serif"));
        assert_eq!(props.get("font-variant"), Some("titling-caps"));
    }

    #[test]
    fn background_dissolve_classifies_tokens() {
        let dissolved =
            dissolve_background("url(a.png) no-repeat fixed top left red").unwrap();
        let get = |name: &str| {
            dissolved
                .iter()
                .find(|(p, _)| p == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("background-image"), "url(a.png)");
        assert_eq!(get("background-repeat"), "no-repeat");
        assert_eq!(get("background-attachment"), "fixed");
        assert_eq!(get("background-position"), "top left");
        assert_eq!(get("background-color"), "red");
        assert_eq!(get("background-clip"), "border");
    }

    #[test]
    fn background_with_gradient_is_kept() {
        assert!(dissolve_background("linear-gradient(red, blue)").is_none());
        assert!(dissolve_background("repeating-LINEAR-Gradient(red, blue)").is_none());
    }

    #[test]
    fn background_layers_accumulate() {
        let dissolved = dissolve_background("url(a.png) top left, url(b.png) red").unwrap();
        let get = |name: &str| {
            dissolved
                .iter()
                .find(|(p, _)| p == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("background-image"), "url(a.png),url(b.png)");
        assert_eq!(get("background-position"), "top left");
        assert_eq!(get("background-color"), "red");
    }

    #[test]
    fn background_merge_round_trip() {
        let mut props = PropertyMap::new();
        props.set("background", "");
        for (prop, value) in dissolve_background("url(a.png) no-repeat red").unwrap() {
            props.set(&prop, value);
        }
        merge_background(&mut props);
        assert_eq!(props.get("background"), Some("url(a.png) no-repeat red"));
        assert!(!props.contains("background-image"));
    }

    #[test]
    fn background_none_round_trip() {
        let mut props = PropertyMap::new();
        props.set("background", "");
        for (prop, value) in dissolve_background("none").unwrap() {
            props.set(&prop, value);
        }
        merge_background(&mut props);
        assert_eq!(props.get("background"), Some("none"));
    }

    #[test]
    fn background_merge_aborts_on_gradient_longhand() {
        let mut props = map(&[
            ("background-image", "linear-gradient(red, blue)"),
            ("background-color", "red"),
        ]);
        merge_background(&mut props);
        assert!(!props.is_set("background"));
        assert!(props.contains("background-image"));
    }

    #[test]
    fn radius_corner_merge_single_token_only() {
        let mut props = map(&[
            ("border-top-left-radius", "5px"),
            ("border-top-right-radius", "5px"),
            ("border-bottom-right-radius", "5px"),
            ("border-bottom-left-radius", "5px"),
        ]);
        merge_four_value(&mut props);
        assert_eq!(props.get("border-radius"), Some("5px"));

        let mut paired = map(&[
            ("border-top-left-radius", "5px 10px"),
            ("border-top-right-radius", "5px 10px"),
            ("border-bottom-right-radius", "5px 10px"),
            ("border-bottom-left-radius", "5px 10px"),
        ]);
        merge_four_value(&mut paired);
        assert!(!paired.contains("border-radius"));
    }
}
