// ==========================================
// 焊接检验记录系统 - 应用装配层
// ==========================================

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
