mod bing_search_client;

pub use bing_search_client::{BingResponse, BingSearchClient, BingWebPage, BingWebPages};
