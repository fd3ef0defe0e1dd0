pub mod sale_routes;
