pub mod bounding_proxy;
