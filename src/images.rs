// src/images.rs
// =============================================================================
// The image selector: keep or skip a downloaded image, and under what name.
//
// Given an image's absolute URL and the content-type header the server
// declared, this decides the destination file name:
//
// 1. The stem comes from the URL: last path segment, query excluded,
//    truncated before the last '.' when there is one ("/img/pic.old?v=2"
//    -> "pic").
// 2. The extension comes from the content type's subtype: text after the
//    last '/', cut at the last '+' when one follows it ("image/svg+xml"
//    -> "svg"). Mime parameters (";charset=...") are stripped first.
// 3. With a non-empty allow-list, the image is kept only when that derived
//    extension matches one of the allowed formats case-insensitively. No
//    content type while filtering is active means skip - never download
//    blind while the user asked for specific formats.
// 4. Without an allow-list and without a content type, the URL path's own
//    extension is used; failing that too, the bare stem.
//
// Everything here is pure string work, no I/O, so every edge case is
// pinned down by the unit tests at the bottom.
// =============================================================================

use url::Url;

// Decides whether to keep an image and derives its destination file name
//
// Parameters:
//   src: the image's absolute URL
//   content_type: the response's content-type header, when the server sent one
//   allowed_formats: lowercased allow-list; empty means accept everything
//
// Returns: Some(file_name) to persist under, or None to skip the image
pub fn select_destination(
    src: &str,
    content_type: Option<&str>,
    allowed_formats: &[String],
) -> Option<String> {
    let stem = file_stem(src)?;
    let declared = content_type.and_then(extension_from_content_type);

    if !allowed_formats.is_empty() {
        // Filtering is active: the content-type-derived extension is the
        // only evidence we accept
        let extension = declared?;
        if !allowed_formats
            .iter()
            .any(|format| format.eq_ignore_ascii_case(&extension))
        {
            return None;
        }
        return Some(format!("{}.{}", stem, extension));
    }

    match declared.or_else(|| path_extension(src)) {
        Some(extension) => Some(format!("{}.{}", stem, extension)),
        None => Some(stem),
    }
}

// Derives the file-name stem from the URL path
//
// Takes the segment after the last '/' (the url crate already keeps the
// query string out of the path), then cuts off the last '.' suffix when
// there is one. A trailing-slash path has no segment to name the file
// after, so it yields None.
fn file_stem(src: &str) -> Option<String> {
    let url = Url::parse(src).ok()?;
    let segment = url.path().rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        return None;
    }

    let stem = match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[..dot],
        _ => segment,
    };
    Some(stem.to_string())
}

// Derives a file extension from a content-type header value
//
// "image/png" -> "png", "image/svg+xml" -> "svg". Returns None when there
// is no '/' to split on or nothing usable after it.
fn extension_from_content_type(content_type: &str) -> Option<String> {
    // Drop mime parameters like "; charset=utf-8" before looking at the
    // subtype
    let essence = content_type.split(';').next()?.trim();

    let slash = essence.rfind('/')?;
    let subtype = &essence[slash + 1..];
    let subtype = match subtype.rfind('+') {
        Some(plus) => &subtype[..plus],
        None => subtype,
    };

    if subtype.is_empty() {
        None
    } else {
        Some(subtype.to_string())
    }
}

// The extension the URL path itself carries, if any
//
// Only consulted when no allow-list is configured and the server declared
// no content type.
fn path_extension(src: &str) -> Option<String> {
    let url = Url::parse(src).ok()?;
    let segment = url.path().rsplit('/').next().unwrap_or("");
    match segment.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < segment.len() => {
            Some(segment[dot + 1..].to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_FILTER: &[String] = &[];

    fn formats(list: &[&str]) -> Vec<String> {
        list.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_content_type_overrides_url_extension() {
        // The '.old' in the URL loses to the declared svg+xml content type
        let name = select_destination(
            "http://example.test/img/pic.old?v=2",
            Some("image/svg+xml"),
            NO_FILTER,
        );
        assert_eq!(name.as_deref(), Some("pic.svg"));
    }

    #[test]
    fn test_plain_subtype() {
        let name = select_destination("http://example.test/photo.jpeg", Some("image/png"), NO_FILTER);
        assert_eq!(name.as_deref(), Some("photo.png"));
    }

    #[test]
    fn test_mime_parameters_are_stripped() {
        let name = select_destination(
            "http://example.test/photo",
            Some("image/png; charset=binary"),
            NO_FILTER,
        );
        assert_eq!(name.as_deref(), Some("photo.png"));
    }

    #[test]
    fn test_allow_list_skips_other_formats() {
        let name = select_destination(
            "http://example.test/anim.gif",
            Some("image/gif"),
            &formats(&["png", "jpg"]),
        );
        assert_eq!(name, None);
    }

    #[test]
    fn test_allow_list_match_is_case_insensitive() {
        let name = select_destination(
            "http://example.test/shot",
            Some("image/PNG"),
            &formats(&["png"]),
        );
        assert_eq!(name.as_deref(), Some("shot.PNG"));
    }

    #[test]
    fn test_allow_list_with_missing_content_type_skips() {
        // Never download with an unknown extension while filtering is active
        let name = select_destination("http://example.test/pic.png", None, &formats(&["png"]));
        assert_eq!(name, None);
    }

    #[test]
    fn test_no_filter_no_content_type_falls_back_to_url_extension() {
        let name = select_destination("http://example.test/pic.old?v=2", None, NO_FILTER);
        assert_eq!(name.as_deref(), Some("pic.old"));
    }

    #[test]
    fn test_no_filter_no_extension_anywhere_keeps_bare_stem() {
        let name = select_destination("http://example.test/img/logo", None, NO_FILTER);
        assert_eq!(name.as_deref(), Some("logo"));
    }

    #[test]
    fn test_trailing_slash_path_is_skipped() {
        // No segment to derive a stem from
        let name = select_destination("http://example.test/img/", Some("image/png"), NO_FILTER);
        assert_eq!(name, None);
    }

    #[test]
    fn test_content_type_without_slash_yields_no_extension() {
        assert_eq!(extension_from_content_type("garbage"), None);
        // With filtering active that means skip
        let name = select_destination("http://example.test/pic", Some("garbage"), &formats(&["png"]));
        assert_eq!(name, None);
    }

    #[test]
    fn test_hidden_file_style_segment_keeps_full_name_as_stem() {
        // ".hidden" has its only '.' at position 0, so it is the stem itself
        let name = select_destination("http://example.test/.hidden", Some("image/png"), NO_FILTER);
        assert_eq!(name.as_deref(), Some(".hidden.png"));
    }

    #[test]
    fn test_query_string_never_leaks_into_the_name() {
        let name = select_destination(
            "http://example.test/a.png?name=evil.exe",
            Some("image/png"),
            NO_FILTER,
        );
        assert_eq!(name.as_deref(), Some("a.png"));
    }
}
