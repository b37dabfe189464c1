mod bing_search_client_test;
mod fs_template_store_test;
mod lopdf_splitter_test;
