//! Utility-class helpers for markup output.
//!
//! [`merge_classes`] joins class lists so that a later utility overrides an
//! earlier one from the same conflict group (`bg-red-500` then `bg-blue-500`
//! keeps only `bg-blue-500`). Variant prefixes such as `dark:` or `hover:`
//! scope the group, so `bg-white dark:bg-black` keeps both.

use std::collections::HashSet;

const CLASS_PREFIX: &str = "tremor";

const DISPLAY: &[&str] = &[
    "block",
    "inline-block",
    "inline",
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "contents",
    "table",
    "hidden",
];

const POSITION: &[&str] = &["static", "fixed", "absolute", "relative", "sticky"];

const TEXT_SIZES: &[&str] = &[
    "xs",
    "sm",
    "base",
    "lg",
    "xl",
    "2xl",
    "3xl",
    "4xl",
    "5xl",
    "6xl",
    "7xl",
    "8xl",
    "9xl",
    "tremor-default",
    "tremor-title",
    "tremor-metric",
    "tremor-label",
];

const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify", "start", "end"];

const FLEX_DIRECTION: &[&str] = &["row", "row-reverse", "col", "col-reverse"];

const FONT_WEIGHTS: &[&str] = &[
    "thin",
    "extralight",
    "light",
    "normal",
    "medium",
    "semibold",
    "bold",
    "extrabold",
    "black",
];

const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "hidden", "none"];

const BG_POSITIONS: &[&str] = &[
    "bottom",
    "center",
    "left",
    "left-bottom",
    "left-top",
    "right",
    "right-bottom",
    "right-top",
    "top",
];

/// Box sides; logical `s`/`e` sit beside the physical ones.
const SIDES: &[&str] = &["x", "y", "t", "r", "b", "l", "s", "e"];

const CORNERS: &[&str] = &[
    "t", "r", "b", "l", "s", "e", "tl", "tr", "br", "bl", "ss", "se", "ee", "es",
];

/// Build the namespaced hook class for one part of a component,
/// e.g. `make_class_name("CategoryBar", "root")` is `tremor-CategoryBar-root`.
#[must_use]
pub fn make_class_name(component: &str, part: &str) -> String {
    format!("{CLASS_PREFIX}-{component}-{part}")
}

/// Merge class lists; later conflicting utilities win.
///
/// Each argument may hold several whitespace-separated classes. Surviving
/// classes keep the position of their last occurrence. A shorthand also
/// removes earlier classes for the sides it covers, so `px-2 p-4` keeps
/// only `p-4` while `p-4 px-2` keeps both.
#[must_use]
pub fn merge_classes(lists: &[&str]) -> String {
    let classes: Vec<&str> = lists
        .iter()
        .flat_map(|list| list.split_whitespace())
        .collect();

    let mut claimed: HashSet<String> = HashSet::new();
    let mut kept: Vec<&str> = Vec::with_capacity(classes.len());

    for class in classes.into_iter().rev() {
        let (scope, group) = conflict_key(class);
        let key = format!("{scope}{group}");
        if !claimed.insert(key) {
            continue;
        }
        claimed.extend(
            covered_groups(&group)
                .into_iter()
                .map(|covered| format!("{scope}{covered}")),
        );
        kept.push(class);
    }

    kept.reverse();
    kept.join(" ")
}

/// Variant scope (`dark:`, `hover:`, `!`) and conflict group of one class.
fn conflict_key(class: &str) -> (String, String) {
    let (variant, utility) = split_variant(class);
    let important = if utility.starts_with('!') { "!" } else { "" };
    let utility = utility.trim_start_matches('!').trim_start_matches('-');
    (format!("{variant}{important}"), utility_group(utility))
}

fn split_variant(class: &str) -> (&str, &str) {
    // Colons inside arbitrary values (`bg-[url(a:b)]`) are not variant separators.
    let mut depth = 0usize;
    let mut split = None;
    for (i, c) in class.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => split = Some(i),
            _ => {}
        }
    }
    match split {
        Some(i) => class.split_at(i + 1),
        None => ("", class),
    }
}

fn utility_group(utility: &str) -> String {
    // Hook classes only ever conflict with themselves.
    if utility.starts_with(CLASS_PREFIX) {
        return utility.into();
    }
    if DISPLAY.contains(&utility) {
        return "display".into();
    }
    if POSITION.contains(&utility) {
        return "position".into();
    }

    let (head, rest) = utility.split_once('-').unwrap_or((utility, ""));
    match head {
        "text" => text_group(rest).into(),
        "font" if FONT_WEIGHTS.contains(&rest) => "font-weight".into(),
        "font" => "font-family".into(),
        "bg" => bg_group(rest).into(),
        "border" => border_group(rest),
        "ring" => ring_group(rest).into(),
        "outline" | "divide" | "stroke" => line_group(head, rest),
        "rounded" => match rest.split('-').next() {
            Some(corner) if CORNERS.contains(&corner) => format!("rounded-{corner}"),
            _ => "rounded".into(),
        },
        "flex" => flex_group(rest).into(),
        "gap" | "overflow" | "overscroll" | "inset" | "translate" | "scale" | "space" => {
            axis_group(head, rest)
        }
        "justify" | "grid" | "col" | "row" | "max" | "min" => {
            match rest.split('-').next().filter(|s| !s.is_empty()) {
                Some(kind) if head != "justify" || kind == "items" || kind == "self" => {
                    format!("{head}-{kind}")
                }
                _ => head.into(),
            }
        }
        _ => head.into(),
    }
}

fn text_group(rest: &str) -> &'static str {
    if TEXT_SIZES.contains(&rest) {
        "text-size"
    } else if TEXT_ALIGN.contains(&rest) {
        "text-align"
    } else {
        "text-color"
    }
}

fn bg_group(rest: &str) -> &'static str {
    match rest {
        _ if rest.starts_with("opacity-") => "bg-opacity",
        "fixed" | "local" | "scroll" => "bg-attachment",
        "auto" | "cover" | "contain" => "bg-size",
        _ if rest == "none" || rest.starts_with("gradient-") => "bg-image",
        _ if rest.starts_with("repeat") || rest == "no-repeat" => "bg-repeat",
        _ if rest.starts_with("clip-") => "bg-clip",
        _ if rest.starts_with("origin-") => "bg-origin",
        _ if BG_POSITIONS.contains(&rest) => "bg-position",
        _ => "bg-color",
    }
}

fn border_group(rest: &str) -> String {
    if BORDER_STYLES.contains(&rest) {
        return "border-style".into();
    }
    if let Some(spacing) = rest.strip_prefix("spacing") {
        return axis_group("border-spacing", spacing);
    }
    match rest {
        "collapse" | "separate" => return "border-collapse".into(),
        _ if rest.starts_with("opacity-") => return "border-opacity".into(),
        _ => {}
    }
    let (first, tail) = rest.split_once('-').unwrap_or((rest, ""));
    if SIDES.contains(&first) {
        let kind = if is_width(tail) { "border-w" } else { "border-color" };
        return format!("{kind}-{first}");
    }
    let kind = if is_width(rest) { "border-w" } else { "border-color" };
    kind.into()
}

fn ring_group(rest: &str) -> &'static str {
    if rest == "inset" {
        return "ring-inset";
    }
    if let Some(offset) = rest.strip_prefix("offset-") {
        return if is_width(offset) {
            "ring-offset-width"
        } else {
            "ring-offset-color"
        };
    }
    if rest.starts_with("opacity-") {
        "ring-opacity"
    } else if is_width(rest) {
        "ring-width"
    } else {
        "ring-color"
    }
}

/// Width, style and color groups shared by `outline`, `divide` and `stroke`.
fn line_group(head: &str, rest: &str) -> String {
    let (first, tail) = rest.split_once('-').unwrap_or((rest, ""));
    if head == "divide" && (first == "x" || first == "y") {
        return if tail == "reverse" {
            format!("divide-{first}-reverse")
        } else {
            format!("divide-{first}")
        };
    }
    if head == "outline" && first == "offset" {
        return "outline-offset".into();
    }
    if BORDER_STYLES.contains(&rest) {
        return format!("{head}-style");
    }
    let kind = if is_width(rest) { "width" } else { "color" };
    format!("{head}-{kind}")
}

fn flex_group(rest: &str) -> &'static str {
    if FLEX_DIRECTION.contains(&rest) {
        "flex-direction"
    } else if rest.starts_with("wrap") || rest == "nowrap" {
        "flex-wrap"
    } else {
        "flex"
    }
}

/// `gap-4` and `gap-x-4` are distinct groups; `gap` covers both axes.
fn axis_group(head: &str, rest: &str) -> String {
    let rest = rest.trim_start_matches('-');
    match rest.split_once('-').map_or(rest, |(axis, _)| axis) {
        axis @ ("x" | "y") => format!("{head}-{axis}"),
        _ => head.into(),
    }
}

/// Bare widths (`border`, `ring-2`) and arbitrary lengths (`border-[3px]`).
fn is_width(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
        || (value.starts_with('[') && value.ends_with("px]"))
}

/// Groups an earlier class loses to when this group appears later.
fn covered_groups(group: &str) -> Vec<String> {
    let expand = |prefix: &str, parts: &[&str]| -> Vec<String> {
        parts.iter().map(|part| format!("{prefix}{part}")).collect()
    };
    match group {
        "p" | "m" => expand(group, SIDES),
        "px" | "mx" => expand(&group[..1], &["l", "r", "s", "e"]),
        "py" | "my" => expand(&group[..1], &["t", "b"]),
        "border-w" | "border-color" => expand(&format!("{group}-"), SIDES),
        "border-w-x" | "border-color-x" => {
            expand(&group[..group.len() - 1], &["l", "r", "s", "e"])
        }
        "border-w-y" | "border-color-y" => expand(&group[..group.len() - 1], &["t", "b"]),
        "rounded" => expand("rounded-", CORNERS),
        "rounded-t" => expand("rounded-", &["tl", "tr"]),
        "rounded-r" => expand("rounded-", &["tr", "br"]),
        "rounded-b" => expand("rounded-", &["br", "bl"]),
        "rounded-l" => expand("rounded-", &["tl", "bl"]),
        "rounded-s" => expand("rounded-", &["ss", "es"]),
        "rounded-e" => expand("rounded-", &["se", "ee"]),
        "gap" | "overflow" | "overscroll" | "scale" | "border-spacing" => {
            expand(&format!("{group}-"), &["x", "y"])
        }
        "inset" => expand("", &["inset-x", "inset-y", "top", "right", "bottom", "left"]),
        "inset-x" => expand("", &["left", "right"]),
        "inset-y" => expand("", &["top", "bottom"]),
        "size" => expand("", &["w", "h"]),
        _ => Vec::new(),
    }
}
