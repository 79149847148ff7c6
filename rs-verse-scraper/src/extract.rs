//! HTML extraction for the poem index and poem pages.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScrapeError;

static POEM_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<ul[^>]*\bid\s*=\s*["']resultats_poeme["'][^>]*>(.*?)</ul>"#)
        .expect("Failed to build regex")
});
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li[^>]*>(.*?)</li>").expect("Failed to build regex"));
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a[^>]*\bhref\s*=\s*["']([^"']+)["']"#).expect("Failed to build regex")
});
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("Failed to build regex"));
static CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<p[^>]*\bclass\s*=\s*["']last["'][^>]*>(.*?)</p>"#)
        .expect("Failed to build regex")
});
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Failed to build regex"));
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Failed to build regex"));

/// Returns the poem links listed on the index page, in page order.
///
/// Only the first link of every list item is kept; items without a link
/// are skipped.
pub fn poem_links(index_html: &str) -> Result<Vec<String>, ScrapeError> {
    let list = POEM_LIST
        .captures(index_html)
        .ok_or(ScrapeError::MissingMarkup("ul#resultats_poeme"))?;

    Ok(LIST_ITEM
        .captures_iter(&list[1])
        .filter_map(|item| LINK.captures(&item[1]).map(|link| decode_entities(&link[1])))
        .collect())
}

/// Returns the poem title, if the page has one.
pub fn poem_title(poem_html: &str) -> Option<String> {
    TITLE
        .captures(poem_html)
        .map(|title| to_text(&title[1]).replace('\n', " "))
}

/// Returns the poem body as plain text, one verse per line.
pub fn poem_content(poem_html: &str) -> Result<String, ScrapeError> {
    let content = CONTENT
        .captures(poem_html)
        .ok_or(ScrapeError::MissingMarkup("p.last"))?;
    Ok(to_text(&content[1]))
}

/// Turns an HTML fragment into plain text.
///
/// `<br>` tags become line breaks, other tags are dropped and the common
/// entities are decoded. Lines are trimmed and blank ones removed.
fn to_text(fragment: &str) -> String {
    let text = LINE_BREAK.replace_all(fragment, "\n");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&rsquo;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<html><body>
        <ul class="menu"><li><a href="accueil.html">Accueil</a></li></ul>
        <ul id="resultats_poeme">
          <li><a href="l_albatros.html">L'albatros</a></li>
          <li>Sans lien</li>
          <li><a href="spleen.html?a=1&amp;b=2">Spleen</a> <a href="autre.html">x</a></li>
        </ul>
    </body></html>"#;

    const POEM: &str = r#"<html><body>
        <h1>L&#39;albatros</h1>
        <p class="first">Charles Baudelaire</p>
        <p class="last">Souvent, pour s'amuser, les hommes d'équipage<br/>
        Prennent des <em>albatros</em>, vastes oiseaux des mers,<br>
        &nbsp;<br />
        Qui suivent, indolents compagnons de voyage,</p>
    </body></html>"#;

    #[test]
    fn links_come_from_the_result_list_only() {
        assert_eq!(
            poem_links(INDEX).unwrap(),
            vec!["l_albatros.html", "spleen.html?a=1&b=2"]
        );
    }

    #[test]
    fn missing_result_list_is_reported() {
        let error = poem_links("<ul><li><a href=\"x.html\">x</a></li></ul>").unwrap_err();
        assert!(matches!(error, ScrapeError::MissingMarkup("ul#resultats_poeme")));
    }

    #[test]
    fn title_is_decoded() {
        assert_eq!(poem_title(POEM).as_deref(), Some("L'albatros"));
        assert_eq!(poem_title("<p>pas de titre</p>"), None);
    }

    #[test]
    fn content_keeps_one_verse_per_line() {
        assert_eq!(
            poem_content(POEM).unwrap(),
            "Souvent, pour s'amuser, les hommes d'équipage\n\
             Prennent des albatros, vastes oiseaux des mers,\n\
             Qui suivent, indolents compagnons de voyage,"
        );
    }

    #[test]
    fn missing_content_is_reported() {
        assert!(matches!(
            poem_content("<p class=\"first\">rien</p>"),
            Err(ScrapeError::MissingMarkup("p.last"))
        ));
    }
}
