//! Walking the sample book catalog the way `ls` and `cd` would.

use searchfs_kernel::{CatalogSearcher, FsError, SearchFs};

fn fs() -> SearchFs<CatalogSearcher> {
    SearchFs::new(CatalogSearcher::sample())
}

async fn ls(fs: &SearchFs<CatalogSearcher>, path: &str) -> Vec<String> {
    let listing = fs.list(path).await.unwrap();
    assert!(listing.attrs.is_empty() || path.trim_matches('/').is_empty());
    listing.names
}

#[tokio::test]
async fn test_all_books() {
    assert_eq!(
        ls(&fs(), "/books").await,
        vec!["The Colour of Magic", "Storm Front", "All Systems Red"]
    );
}

#[tokio::test]
async fn test_all_tags_deduplicated() {
    let tags = ls(&fs(), "/tags").await;
    assert_eq!(tags.len(), 7);
    assert_eq!(tags.iter().filter(|t| *t == "Fantasy").count(), 1);
}

#[tokio::test]
async fn test_all_authors() {
    assert_eq!(
        ls(&fs(), "/author").await,
        vec!["Terry Pratchett", "Jim Butcher", "Martha Wells"]
    );
}

#[tokio::test]
async fn test_tag_result_lists_books() {
    assert_eq!(
        ls(&fs(), "/tags/Fantasy/").await,
        vec!["The Colour of Magic", "Storm Front"]
    );
}

#[tokio::test]
async fn test_filtered_tags() {
    // Tags carried by Fantasy books.
    assert_eq!(
        ls(&fs(), "/tags/Fantasy/tags").await,
        vec!["Fantasy", "Discworld", "Urban Fantasy", "Dresden Files"]
    );
}

#[tokio::test]
async fn test_stacked_filters() {
    let fs = fs();
    assert_eq!(
        ls(&fs, "/tags/Fantasy/author/Jim Butcher/books").await,
        vec!["Storm Front"]
    );
    assert!(
        ls(&fs, "/tags/Robots/author/Jim Butcher/books")
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_book_properties() {
    let fs = fs();
    assert_eq!(
        ls(&fs, "/books/Storm Front").await,
        vec!["title", "author", "tags"]
    );

    let attr = fs.stat("/books/Storm Front/title").await.unwrap();
    assert!(attr.is_file());
    assert_eq!(attr.size, "Storm Front\n".len() as u64);

    let attr = fs.stat("/books/Storm Front/publisher").await.unwrap();
    assert!(attr.is_file());
    assert_eq!(attr.size, 0);

    let mut buf = [0u8; 64];
    let len = buf.len();
    assert_eq!(fs.read_at("/books/Storm Front/title", &mut buf, len, 0), 0);
}

#[tokio::test]
async fn test_unregistered_entity_is_missing() {
    let err = fs().list("/films").await.unwrap_err();
    assert!(matches!(err, FsError::Unresolvable(_)));
}

#[tokio::test]
async fn test_entity_named_property_is_a_search() {
    // "author" is itself an entity, so it lists the book's author.
    let fs = fs();
    assert!(fs.stat("/books/Storm Front/author").await.unwrap().is_dir());
    assert_eq!(
        ls(&fs, "/books/Storm Front/author").await,
        vec!["Jim Butcher"]
    );
}

#[tokio::test]
async fn test_too_deep_is_missing() {
    let err = fs().stat("/books/Storm Front/title/x").await.unwrap_err();
    assert!(matches!(err, FsError::Unresolvable(_)));
}
