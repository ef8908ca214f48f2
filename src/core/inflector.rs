//! String inflection for resource names
//!
//! Converts resource short names (`BookReview`) into link relation keys
//! (`book_review`) and URL path segments (`book_reviews`, `book-reviews`).
//! All conversions are ASCII only.

/// Convert a camelCase or PascalCase name to snake_case
///
/// The first character is always lower-cased and every following uppercase
/// ASCII letter becomes `_` followed by its lowercase form. Consecutive
/// capitals are not grouped, so acronyms are split letter by letter.
///
/// # Examples
///
/// ```
/// use this_hal::core::inflector::camel_case_to_snake_case;
///
/// assert_eq!(camel_case_to_snake_case("BookReview"), "book_review");
/// assert_eq!(camel_case_to_snake_case("Book"), "book");
/// assert_eq!(camel_case_to_snake_case("ISBNCode"), "i_s_b_n_code");
/// ```
pub fn camel_case_to_snake_case(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut snake = String::with_capacity(name.len() + 4);
    snake.push(first.to_ascii_lowercase());
    for c in chars {
        if c.is_ascii_uppercase() {
            snake.push('_');
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// Convert a class-style name to a lowercase underscored table name
///
/// An underscore is only inserted before a capital that follows a word
/// character, so `BookReview` becomes `book_review`.
pub fn tableize(name: &str) -> String {
    let mut table = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase()
            && previous.is_some_and(|p| p.is_ascii_alphanumeric() || p == '_')
        {
            table.push('_');
        }
        table.push(c.to_ascii_lowercase());
        previous = Some(c);
    }
    table
}

/// Like [`tableize`] but with dashes between words
pub fn dasherize(name: &str) -> String {
    tableize(name).replace('_', "-")
}

/// Plural forms of English nouns, used for collection path segments
pub struct Pluralizer;

impl Pluralizer {
    /// Convert a singular noun to its plural form
    ///
    /// Only the end of the word is inspected, so `book_review` pluralizes to
    /// `book_reviews`.
    ///
    /// # Examples
    ///
    /// ```
    /// use this_hal::core::inflector::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize("book"), "books");
    /// assert_eq!(Pluralizer::pluralize("category"), "categories");
    /// assert_eq!(Pluralizer::pluralize("address"), "addresses");
    /// ```
    pub fn pluralize(singular: &str) -> String {
        if singular.is_empty() {
            return singular.to_string();
        }

        match singular {
            // consonant + y -> ies
            s if s.ends_with('y')
                && !["ay", "ey", "iy", "oy", "uy"].iter().any(|v| s.ends_with(v))
                && s.len() > 1 =>
            {
                format!("{}ies", &s[..s.len() - 1])
            }

            s if ["s", "sh", "ch", "x", "z"].iter().any(|v| s.ends_with(v)) => {
                format!("{}es", s)
            }

            s if s.ends_with("fe") && s.len() > 2 => format!("{}ves", &s[..s.len() - 2]),

            s if s.ends_with('f') && !s.ends_with("ff") && s.len() > 1 => {
                format!("{}ves", &s[..s.len() - 1])
            }

            s if s.ends_with('o') && s.len() > 1 => {
                let before_o = s.as_bytes()[s.len() - 2];
                if matches!(before_o, b'a' | b'e' | b'i' | b'o' | b'u') {
                    format!("{}s", s)
                } else {
                    match s {
                        "photo" | "piano" | "halo" | "video" | "memo" => format!("{}s", s),
                        _ => format!("{}es", s),
                    }
                }
            }

            s => format!("{}s", s),
        }
    }
}
