pub mod llama_cloud;
pub mod observability;
pub mod storage;
