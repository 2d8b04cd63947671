pub mod tramo_service;
