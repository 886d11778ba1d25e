pub mod fetcher;

pub use fetcher::{fixture_json, load_fixture, FetchedResult, ResultFetcher, ResultSource};
