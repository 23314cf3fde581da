//! URL pattern and canonical name derivation from view class names.
//!
//! `UserListView` becomes the path pattern `^user/list$` and the canonical
//! name `adminlte.user.list`.

/// Suffix stripped from class names before deriving anything.
pub const VIEW_SUFFIX: &str = "View";

/// Namespace every canonical name starts with.
pub const ROOT_NAMESPACE: &str = "adminlte";

/// Pattern derived for `IndexView`.
pub const INDEX_PATTERN: &str = "^index$";

/// Pattern matching the empty path under the admin prefix.
pub const ROOT_PATTERN: &str = "^$";

fn base_name(class_name: &str) -> &str {
    class_name.strip_suffix(VIEW_SUFFIX).unwrap_or(class_name)
}

/// Derive the anchored path pattern for a view class.
///
/// Every uppercase character is lower-cased and, unless it is the first
/// character, preceded by a `/`.
pub fn derive_path_pattern(class_name: &str) -> String {
    let mut pattern = String::from("^");

    for (index, ch) in base_name(class_name).chars().enumerate() {
        if ch.is_uppercase() {
            if index != 0 {
                pattern.push('/');
            }
            pattern.extend(ch.to_lowercase());
        } else {
            pattern.push(ch);
        }
    }

    pattern.push('$');
    pattern
}

/// Derive the dotted canonical name for a view class.
///
/// Every uppercase character, the first included, becomes `.` followed by
/// its lowercase form.
pub fn derive_canonical_name(class_name: &str) -> String {
    let mut name = String::from(ROOT_NAMESPACE);

    for ch in base_name(class_name).chars() {
        if ch.is_uppercase() {
            name.push('.');
            name.extend(ch.to_lowercase());
        } else {
            name.push(ch);
        }
    }

    name
}

/// Turn an anchored pattern without parameters back into a relative path.
pub(crate) fn pattern_to_path(pattern: &str) -> &str {
    let trimmed = pattern.strip_prefix('^').unwrap_or(pattern);
    trimmed.strip_suffix('$').unwrap_or(trimmed)
}
