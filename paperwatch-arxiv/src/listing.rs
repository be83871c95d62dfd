//! Catchup listing parser
//!
//! Extracts paper records out of the catchup page HTML. Each paper is a
//! `<dt>`/`<dd>` pair inside the listing `<dl>`: the identifier lives in
//! `span.list-identifier`, the metadata in `div.meta`.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::FetchError;
use paperwatch_core::PaperRecord;

/// Parse the catchup page into paper records.
///
/// Entries missing an identifier or a title are skipped with a warning;
/// a page without a listing `<dl>` at all is an error.
pub fn parse_listing(html: &str) -> Result<Vec<PaperRecord>, FetchError> {
    let document = Html::parse_document(html);

    let dl_selector = Selector::parse("dl").unwrap();
    let id_selector = Selector::parse("span.list-identifier").unwrap();
    let abs_selector = Selector::parse(r#"a[href^="/abs/"]"#).unwrap();
    let meta_selector = Selector::parse("div.meta").unwrap();

    let listing = document
        .select(&dl_selector)
        .next()
        .ok_or_else(|| FetchError::MalformedListing("no <dl> listing found".to_string()))?;

    let identifiers: Vec<_> = listing.select(&id_selector).collect();
    let metas: Vec<_> = listing.select(&meta_selector).collect();

    let mut papers = Vec::new();

    for (id_span, meta) in identifiers.iter().zip(metas.iter()) {
        // The span also carries pdf/other-format anchors; only the abs
        // link names the paper
        let id = match id_span
            .select(&abs_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| href.strip_prefix("/abs/"))
        {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                warn!("listing entry with unusable identifier link, skipping");
                continue;
            }
        };

        let title = match field_text(meta, "div.list-title", "Title:") {
            Some(title) if !title.is_empty() => title,
            _ => {
                warn!("listing entry {} has no title, skipping", id);
                continue;
            }
        };

        let authors = field_text(meta, "div.list-authors", "Authors:")
            .map(|joined| {
                joined
                    .split(',')
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let abstract_text = field_text(meta, "p.mathjax", "").unwrap_or_default();

        papers.push(PaperRecord {
            id,
            title,
            authors,
            abstract_text,
        });
    }

    Ok(papers)
}

/// Collect the text of the first element matching `selector` under `meta`,
/// strip the descriptor prefix, and normalize whitespace
fn field_text(meta: &ElementRef, selector: &str, prefix: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    let element = meta.select(&selector).next()?;
    let text: String = element.text().collect();
    let text = normalize_whitespace(&text);
    let text = text.strip_prefix(prefix).unwrap_or(&text).trim();
    Some(text.to_string())
}

/// Collapse runs of whitespace (the listing wraps lines freely)
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html>
        <body>
        <h2>Catchup results for quant-ph</h2>
        <dl>
            <dt>
                <a name="item1">[1]</a>
                <span class="list-identifier">
                    <a href="/abs/2301.01234" title="Abstract">arXiv:2301.01234</a> [pdf]
                </span>
            </dt>
            <dd>
                <div class="meta">
                    <div class="list-title mathjax">
                        <span class="descriptor">Title:</span> Quantum entanglement
                        in driven cavities
                    </div>
                    <div class="list-authors">
                        <span class="descriptor">Authors:</span>
                        <a href="/a/smith_a_1">Alice Smith</a>,
                        <a href="/a/lee_b_1">Bob Lee</a>
                    </div>
                    <p class="mathjax">We drive a cavity and watch
                    what happens.</p>
                </div>
            </dd>
            <dt>
                <span class="list-identifier">
                    <a href="/abs/2301.05678" title="Abstract">arXiv:2301.05678</a> [pdf]
                </span>
            </dt>
            <dd>
                <div class="meta">
                    <div class="list-title mathjax">
                        <span class="descriptor">Title:</span> Spin qubits in silicon
                    </div>
                    <div class="list-authors">
                        <span class="descriptor">Authors:</span>
                        <a href="/a/diaz_c_1">Carol Diaz</a>
                    </div>
                    <p class="mathjax">Silicon is nice.</p>
                </div>
            </dd>
        </dl>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_listing() {
        let papers = parse_listing(LISTING).unwrap();
        assert_eq!(papers.len(), 2);

        assert_eq!(papers[0].id, "2301.01234");
        assert_eq!(papers[0].title, "Quantum entanglement in driven cavities");
        assert_eq!(papers[0].authors, vec!["Alice Smith", "Bob Lee"]);
        assert_eq!(
            papers[0].abstract_text,
            "We drive a cavity and watch what happens."
        );

        assert_eq!(papers[1].id, "2301.05678");
        assert_eq!(papers[1].authors, vec!["Carol Diaz"]);
    }

    #[test]
    fn test_format_anchors_do_not_shift_entries() {
        // Real catchup pages put pdf and other-format links in the same
        // span as the abs link; those must not eat the next entry
        let html = r#"
            <dl>
                <dt>
                    <span class="list-identifier">
                        <a href="/abs/2301.01234" title="Abstract">arXiv:2301.01234</a>
                        [<a href="/pdf/2301.01234" title="Download PDF">pdf</a>,
                        <a href="/format/2301.01234" title="Other formats">other</a>]
                    </span>
                </dt>
                <dd><div class="meta">
                    <div class="list-title">Title: First paper</div>
                    <div class="list-authors">Authors: Alice Smith</div>
                </div></dd>
                <dt>
                    <span class="list-identifier">
                        <a href="/abs/2301.05678" title="Abstract">arXiv:2301.05678</a>
                        [<a href="/pdf/2301.05678" title="Download PDF">pdf</a>]
                    </span>
                </dt>
                <dd><div class="meta">
                    <div class="list-title">Title: Second paper</div>
                    <div class="list-authors">Authors: Bob Lee</div>
                </div></dd>
            </dl>
        "#;

        let papers = parse_listing(html).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].id, "2301.01234");
        assert_eq!(papers[0].title, "First paper");
        assert_eq!(papers[1].id, "2301.05678");
        assert_eq!(papers[1].title, "Second paper");
    }

    #[test]
    fn test_missing_listing_is_an_error() {
        let err = parse_listing("<html><body><p>down for maintenance</p></body></html>")
            .unwrap_err();
        assert!(matches!(err, FetchError::MalformedListing(_)));
    }

    #[test]
    fn test_entry_without_title_is_skipped() {
        let html = r#"
            <dl>
                <dt><span class="list-identifier"><a href="/abs/2301.00001">arXiv:2301.00001</a></span></dt>
                <dd><div class="meta"><div class="list-authors">Authors: Nobody</div></div></dd>
                <dt><span class="list-identifier"><a href="/abs/2301.00002">arXiv:2301.00002</a></span></dt>
                <dd><div class="meta">
                    <div class="list-title">Title: Kept paper</div>
                    <div class="list-authors">Authors: Alice Smith</div>
                </div></dd>
            </dl>
        "#;
        let papers = parse_listing(html).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Kept paper");
    }

    #[test]
    fn test_normalize_whitespace() {
        let input = "  hello   world \n\t test ";
        assert_eq!(normalize_whitespace(input), "hello world test");
    }
}
