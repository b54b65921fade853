use actix_web::web;

pub mod health;
pub mod realtime;

/// Register every HTTP route. Shared by `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Realtime routes: /ws/rooms/{room_id}
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
