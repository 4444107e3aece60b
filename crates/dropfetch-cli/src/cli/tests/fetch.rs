//! Tests for the fetch subcommand.

use super::{parse_err, parse_fetch};

#[test]
fn cli_parse_fetch_link() {
    let a = parse_fetch(&[
        "dropfetch",
        "fetch",
        "--link",
        "https://dl.example.com/s/abc/photo.png",
        "--name",
        "photo.png",
        "--size",
        "5000000",
    ]);
    assert_eq!(
        a.link.as_ref().map(|u| u.as_str()),
        Some("https://dl.example.com/s/abc/photo.png")
    );
    assert_eq!(a.name.as_deref(), Some("photo.png"));
    assert_eq!(a.size, Some(5_000_000));
    assert!(a.listing.is_none());
    assert!(!a.library);
    assert!(!a.document);
    assert!(a.restrict.is_empty());
}

#[test]
fn cli_parse_fetch_listing_with_policy() {
    let a = parse_fetch(&[
        "dropfetch",
        "fetch",
        "--listing",
        "/tmp/listing.json",
        "--library",
        "--path",
        "/Folder Name/",
        "--max-size-mb",
        "25",
        "--restrict",
        "txt",
        "--restrict",
        "mp4",
    ]);
    assert_eq!(a.listing.as_deref(), Some(std::path::Path::new("/tmp/listing.json")));
    assert!(a.library);
    assert_eq!(a.path.as_deref(), Some("/Folder Name/"));
    assert_eq!(a.max_size_mb, Some(25));
    assert_eq!(a.restrict, vec!["txt", "mp4"]);
}

#[test]
fn cli_fetch_needs_a_source() {
    parse_err(&["dropfetch", "fetch"]);
}

#[test]
fn cli_fetch_link_needs_name() {
    parse_err(&["dropfetch", "fetch", "--link", "https://dl.example.com/x"]);
}

#[test]
fn cli_fetch_rejects_bad_url() {
    parse_err(&["dropfetch", "fetch", "--link", "not a url", "--name", "x.bin"]);
}

#[test]
fn cli_fetch_library_and_document_conflict() {
    parse_err(&[
        "dropfetch",
        "fetch",
        "--listing",
        "l.json",
        "--library",
        "--document",
    ]);
}

#[test]
fn cli_fetch_listing_and_link_conflict() {
    parse_err(&[
        "dropfetch",
        "fetch",
        "--listing",
        "l.json",
        "--link",
        "https://dl.example.com/x",
        "--name",
        "x",
    ]);
}
