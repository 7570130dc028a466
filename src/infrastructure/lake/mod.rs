pub mod parquet_store;
