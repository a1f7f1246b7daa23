//! The optimiser pass: a single downward traversal over the block tree
//! that dissolves shorthands, rewrites declaration values and merges
//! longhands back together.

use crate::ast::{is_important, strip_important, Block, PropertyMap, Stylesheet, IMPORTANT};
use crate::config::{Config, ShorthandLevel};
use crate::rewrite;
use crate::shorthand;
use crate::split::{split_outside, split_ws};
use crate::{color, number};
use log::info;

/// Optimise a parsed stylesheet in place. Total: malformed declarations
/// are left as they are.
pub fn optimise(stylesheet: &mut Stylesheet, config: &Config) {
    for block in &mut stylesheet.blocks {
        optimise_block(block, config);
    }
}

fn optimise_block(block: &mut Block, config: &Config) {
    match block {
        Block::Style(style) => optimise_properties(&mut style.properties, config),
        Block::At(at) => {
            for child in &mut at.blocks {
                optimise_block(child, config);
            }
        }
        Block::Comment(_) | Block::Directive(_) => {}
    }
}

/// Run the full declaration pipeline over one property map: dissolve,
/// rewrite values, then merge.
pub fn optimise_properties(props: &mut PropertyMap, config: &Config) {
    let level = config.optimise_shorthands;

    if level >= ShorthandLevel::Common {
        shorthand::dissolve(props, level);
    }

    for declaration in props.iter_mut() {
        if declaration.value.is_empty() {
            continue;
        }
        let subs: Vec<String> = split_outside(',', &declaration.value)
            .iter()
            .map(|sub| sub_value(&declaration.property, sub, config))
            .collect();
        declaration.value = value(&declaration.property, &subs.join(","), config);
    }

    if level >= ShorthandLevel::Common {
        shorthand::merge_four_value(props);
        shorthand::merge_pairs(props);
    }
    if level >= ShorthandLevel::Font {
        shorthand::merge_font(props);
    }
    if level >= ShorthandLevel::Background {
        shorthand::merge_background(props);
    }
}

/// Whole-value rewriting, dispatched on the property.
fn value(property: &str, value: &str, config: &Config) -> String {
    let mut out = value.to_string();
    let base = rewrite::strip_vendor(property);

    if config.optimise_shorthands >= ShorthandLevel::Common {
        if shorthand::is_box_shorthand(property) {
            out = shorthand::compress_shorthand_value(&out);
        } else if base == "border-radius" {
            out = shorthand::compress_radius_value(&out);
        } else if base == "transform" {
            let important = is_important(&out);
            let merged = rewrite::merge_transforms(strip_important(&out));
            out = shorthand::attach_important(merged, important);
        }
    }

    if config.compress_colors && (property == "background-image" || property == "background") {
        let important = is_important(&out);
        let rewritten: Vec<String> = split_outside(',', strip_important(&out))
            .iter()
            .map(|part| rewrite::compress_gradient_colors(part.trim()))
            .collect();
        out = shorthand::attach_important(rewritten.join(","), important);
    }

    if is_important(&out) {
        let compacted = format!("{}{}", strip_important(&out), IMPORTANT);
        if compacted != out {
            info!("compacted importance marker on {}", property);
        }
        out = compacted;
    }
    out
}

/// Rewriting of one comma-separated sub-value.
fn sub_value(property: &str, sub: &str, config: &Config) -> String {
    let important = is_important(sub);
    let mut out = strip_important(sub).to_string();

    if property == "font-weight" && config.compress_font_weight {
        if out.eq_ignore_ascii_case("bold") {
            out = "700".to_string();
            info!("font-weight bold rewritten to 700");
        } else if out.eq_ignore_ascii_case("normal") {
            out = "400".to_string();
            info!("font-weight normal rewritten to 400");
        }
    }

    let numbers_on = config.optimise_shorthands >= ShorthandLevel::Common;
    if numbers_on || config.compress_colors {
        let parts: Vec<String> = split_ws(&out)
            .iter()
            .map(|token| {
                let mut token = token.to_string();
                if numbers_on {
                    token = number::optimise(Some(property), &token);
                }
                if config.compress_colors {
                    token = color::optimise(&token);
                }
                token
            })
            .collect();
        out = parts.join(" ");
    }
    if numbers_on {
        out = rewrite::compress_calc(&out);
    }

    shorthand::attach_important(out, important)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputStyle;

    fn optimise_map(pairs: &[(&str, &str)], config: &Config) -> PropertyMap {
        let mut props = PropertyMap::new();
        for (prop, value) in pairs {
            props.set(prop, *value);
        }
        optimise_properties(&mut props, config);
        props
    }

    fn all_levels() -> Config {
        Config {
            optimise_shorthands: ShorthandLevel::All,
            compress_colors: true,
            compress_font_weight: true,
            style: OutputStyle::Pretty,
        }
    }

    #[test]
    fn margin_dissolve_and_remerge_keeps_position() {
        let config = all_levels();
        let props = optimise_map(
            &[("margin", "1px 1px 1px 1px"), ("color", "#ff0000")],
            &config,
        );
        let order: Vec<_> = props.iter().map(|d| d.property.as_str()).collect();
        assert_eq!(order, vec!["margin", "color"]);
        assert_eq!(props.get("margin"), Some("1px"));
        assert_eq!(props.get("color"), Some("red"));
    }

    #[test]
    fn longhands_merge_at_common_level() {
        let mut config = all_levels();
        config.optimise_shorthands = ShorthandLevel::Common;
        let props = optimise_map(
            &[
                ("margin-top", "1px"),
                ("margin-right", "2px"),
                ("margin-bottom", "1px"),
                ("margin-left", "2px"),
            ],
            &config,
        );
        assert_eq!(props.get("margin"), Some("1px 2px"));
        assert!(!props.contains("margin-top"));
    }

    #[test]
    fn level_none_only_compacts_importance() {
        let config = Config {
            optimise_shorthands: ShorthandLevel::None,
            compress_colors: false,
            compress_font_weight: false,
            style: OutputStyle::Pretty,
        };
        let props = optimise_map(
            &[
                ("margin", "1px 1px 1px 1px"),
                ("color", "#ff0000"),
                ("width", "0.50em  !  important"),
            ],
            &config,
        );
        assert_eq!(props.get("margin"), Some("1px 1px 1px 1px"));
        assert_eq!(props.get("color"), Some("#ff0000"));
        assert_eq!(props.get("width"), Some("0.50em!important"));
    }

    #[test]
    fn font_level_gates_font_merging() {
        let mut config = all_levels();
        config.optimise_shorthands = ShorthandLevel::Common;
        let props = optimise_map(&[("font", "12px serif")], &config);
        assert_eq!(props.get("font"), Some("12px serif"));

        config.optimise_shorthands = ShorthandLevel::Font;
        let props = optimise_map(&[("font", "italic 12px serif")], &config);
        assert_eq!(props.get("font"), Some("italic 12px serif"));
        assert!(!props.contains("font-size"));
    }

    #[test]
    fn background_round_trip_drops_defaults() {
        let config = all_levels();
        let props = optimise_map(
            &[("background", "url(a.png) repeat scroll 0 0 #ff0000")],
            &config,
        );
        assert_eq!(props.get("background"), Some("url(a.png) red"));
        assert!(!props.contains("background-image"));
    }

    #[test]
    fn gradient_background_is_not_dissolved() {
        let config = all_levels();
        let props = optimise_map(
            &[("background", "linear-gradient(to right, #ff0000, #ffffff)")],
            &config,
        );
        assert_eq!(
            props.get("background"),
            Some("linear-gradient(to right,red,#fff)")
        );
        assert!(!props.contains("background-image"));
    }

    #[test]
    fn transform_merges_with_vendor_prefix() {
        let config = all_levels();
        let props = optimise_map(
            &[("-webkit-transform", "translateX(1px) translateY(2px)")],
            &config,
        );
        assert_eq!(props.get("-webkit-transform"), Some("translate(1px,2px)"));
    }

    #[test]
    fn font_weight_mapping_per_sub_value() {
        let config = all_levels();
        let props = optimise_map(&[("font-weight", "bold")], &config);
        assert_eq!(props.get("font-weight"), Some("700"));

        let mut config = all_levels();
        config.compress_font_weight = false;
        let props = optimise_map(&[("font-weight", "bold")], &config);
        assert_eq!(props.get("font-weight"), Some("bold"));
    }

    #[test]
    fn calc_sub_values_lose_spaces() {
        let config = all_levels();
        let props = optimise_map(&[("width", "calc(100% - 10px)")], &config);
        assert_eq!(props.get("width"), Some("calc(100%-10px)"));
    }

    #[test]
    fn no_shorthand_coexists_with_its_longhands() {
        let config = all_levels();
        let props = optimise_map(
            &[
                ("margin", "4px"),
                ("margin-top", "1px"),
                ("padding-top", "1px"),
                ("padding-right", "2px"),
                ("padding-bottom", "3px"),
                ("padding-left", "4px"),
            ],
            &config,
        );
        for (shorthand, longhands) in shorthand::BOX_SHORTHANDS {
            if props.is_set(shorthand) {
                assert!(
                    !longhands.iter().all(|l| props.is_set(l)),
                    "{} coexists with all its longhands",
                    shorthand
                );
            }
        }
        assert_eq!(props.get("margin"), Some("4px"));
        assert_eq!(props.get("padding"), Some("1px 2px 3px 4px"));
    }

    #[test]
    fn optimise_recurses_into_at_blocks() {
        use crate::ast::{AtBlock, StyleBlock};

        let mut inner = PropertyMap::new();
        inner.set("pause-before", "weak");
        inner.set("pause-after", "medium");
        let mut sheet = Stylesheet::default();
        sheet.blocks.push(Block::At(AtBlock {
            prelude: "@media screen".to_string(),
            blocks: vec![Block::Style(StyleBlock {
                selector: "a".to_string(),
                properties: inner,
            })],
        }));

        optimise(&mut sheet, &all_levels());
        let Block::At(at) = &sheet.blocks[0] else {
            panic!("expected at block");
        };
        let Block::Style(style) = &at.blocks[0] else {
            panic!("expected style block");
        };
        assert_eq!(style.properties.get("pause"), Some("weak medium"));
    }
}
