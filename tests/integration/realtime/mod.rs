//! Real-time gateway integration tests

mod gateway_test;
