// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stylesheet injected once per page for the loading indicator.

use crate::config::is_rtl;

/// Id of the injected `<style>` element. Its presence means "already injected".
pub const STYLE_MARKER: &str = "globalsearch-styles";

const BASE_CSS: &str = "
.loading-state { display: flex; align-items: center; padding: 1rem; color: #666; }
.spinner { animation: rotate 1s linear infinite; height: 20px; width: 20px; }
.spinner circle {
    stroke: currentColor;
    stroke-linecap: round;
    stroke-dasharray: 90, 150;
    stroke-dashoffset: 0;
    animation: dash 1.5s ease-in-out infinite;
}
@keyframes rotate { 100% { transform: rotate(360deg); } }
@keyframes dash {
    0% { stroke-dasharray: 1, 150; stroke-dashoffset: 0; }
    50% { stroke-dasharray: 90, 150; stroke-dashoffset: -35; }
    100% { stroke-dasharray: 90, 150; stroke-dashoffset: -124; }
}
";

/// Stylesheet for `locale`. The spinner gap sits on the trailing side.
pub fn stylesheet(locale: &str) -> String {
    let side = if is_rtl(locale) { "left" } else { "right" };
    format!("{BASE_CSS}.spinner {{ margin-{side}: 8px; }}\n")
}
