// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering of widget snapshots for the `globalsearch` CLI.
//!
//! OneDark for dark terminals, One Light for light ones. The detection tries
//! `GLOBALSEARCH_THEME` first, then `COLORFGBG`, then defaults to dark.
//! `NO_COLOR` and non-TTY stdout turn styling off entirely, so piped output
//! is plain text.
//!
//! Everything here builds `String`s; the caller decides where they go.

use globalsearch::{LocaleMessages, RenderSnapshot, RenderState, ResultItem};
use std::sync::OnceLock;

/// Width between the vertical borders.
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("GLOBALSEARCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers, or plain text when colors are off.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

/// Visible length, ignoring ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Cut plain text to `max` chars, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) -> String {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    format!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"))
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) -> String {
    labelled_rule('┌', '┐', label)
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) -> String {
    labelled_rule('├', '┤', label)
}

/// └──────────────────┘
pub fn section_bot() -> String {
    border(&format!("└{}┘", "─".repeat(BOX_WIDTH)))
}

fn labelled_rule(left: char, right: char, label: &str) -> String {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    format!(
        "{}{}{}",
        border(&left.to_string()),
        label_part,
        border(&format!("{}{}", "─".repeat(remaining), right))
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// SNAPSHOTS
// ═══════════════════════════════════════════════════════════════════════════

/// State name colored by outcome.
pub fn state_badge(state: &RenderState) -> String {
    let color: fn() -> String = match state {
        RenderState::Idle => GRAY,
        RenderState::Loading => YELLOW,
        RenderState::Populated(_) => GREEN,
        RenderState::Empty => BLUE,
        RenderState::Error => RED,
    };
    themed(color, &[BOLD], state.name())
}

fn result_rows(index: usize, item: &ResultItem, lines: &mut Vec<String>) {
    let inner = BOX_WIDTH - 6;
    let number = themed(GRAY, &[], &format!("{:>3}", index + 1));
    lines.push(row(&format!(" {number}  {}", themed(CYAN, &[BOLD], &truncate(&item.title, inner)))));
    let descriptor = item.descriptor();
    if !descriptor.is_empty() {
        lines.push(row(&format!("      {}", truncate(&descriptor, inner))));
    }
    lines.push(row(&format!("      {}", themed(GRAY, &[DIM], &truncate(&item.url, inner)))));
}

/// Boxed view of one render, with the localized texts the page would show.
pub fn format_snapshot(snapshot: &RenderSnapshot, messages: &LocaleMessages) -> String {
    let mut lines = Vec::new();
    let label = if snapshot.query.is_empty() {
        "SEARCH".to_string()
    } else {
        format!("SEARCH \"{}\"", truncate(&snapshot.query, BOX_WIDTH / 2))
    };
    lines.push(section_top(&label));

    let visibility = if snapshot.visible { "shown" } else { "hidden" };
    let mut status = format!(" {}  {}", state_badge(&snapshot.state), themed(GRAY, &[DIM], visibility));
    if let RenderState::Populated(items) = &snapshot.state {
        let noun = if items.len() == 1 { "result" } else { "results" };
        status.push_str(&format!("  {} {noun}", items.len()));
    }
    lines.push(row(&status));

    match &snapshot.state {
        RenderState::Idle => {}
        RenderState::Loading => {
            lines.push(section_mid("STATUS"));
            lines.push(row(&format!(" {}", themed(YELLOW, &[], &messages.searching))));
        }
        RenderState::Populated(items) => {
            lines.push(section_mid("RESULTS"));
            for (index, item) in items.iter().enumerate() {
                result_rows(index, item, &mut lines);
            }
        }
        RenderState::Empty => {
            lines.push(section_mid("STATUS"));
            lines.push(row(&format!(" {}", messages.no_results)));
        }
        RenderState::Error => {
            lines.push(section_mid("STATUS"));
            lines.push(row(&format!(" {}", themed(RED, &[], &messages.error))));
        }
    }

    lines.push(section_bot());
    lines.join("\n")
}
