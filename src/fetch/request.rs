// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request URLs for the Collection Query API.

use crate::config::FilterConfig;
use url::Url;

pub const TITLE_CONTAINS: &str = "filter[title:contains]";
pub const PUBLISHED_IS: &str = "filter[published:is]";
pub const LOCALE_IS: &str = "filter[locale:is]";

/// `{base}/{collection}/entries?filter[title:contains]={query}[&...]`.
///
/// `base` must end in `/` (see `SearchConfig::api_base_url`). The collection
/// name is pushed as a single path segment, so a name containing `/` or `?`
/// is percent-encoded rather than reshaping the URL.
pub fn request_url(
    base: &Url,
    collection: &str,
    query: &str,
    filters: &FilterConfig,
    locale: &str,
) -> Result<Url, url::ParseError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithoutBase)?;
        segments.pop_if_empty().push(collection).push("entries");
    }

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(TITLE_CONTAINS, query);
        if filters.published_only {
            pairs.append_pair(PUBLISHED_IS, "true");
        }
        if filters.match_locale {
            pairs.append_pair(LOCALE_IS, locale);
        }
    }
    Ok(url)
}
