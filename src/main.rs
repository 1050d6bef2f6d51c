use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use jpashop_backend::{
    config::Config,
    database::{create_pool, init_sample_data, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 示例数据
    if config.seed.enabled
        && let Err(e) = init_sample_data(&pool).await
    {
        log::error!("Failed to initialize sample data: {:?}", e);
    }

    // 创建服务
    let member_service = MemberService::new(pool.clone());
    let item_service = ItemService::new(pool.clone());
    let order_service = OrderService::new(pool.clone(), config.fetch.clone());
    let order_query_service = OrderQueryService::new(pool.clone(), config.fetch.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{} (batch fetch size {})",
        config.server.host,
        config.server.port,
        config.fetch.batch_size
    );

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&cors_config))
            .app_data(web::Data::new(member_service.clone()))
            .app_data(web::Data::new(item_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(order_query_service.clone()))
            .configure(swagger_config)
            .configure(handlers::member_config)
            .configure(handlers::order_config)
            .configure(handlers::simple_order_config)
            .configure(handlers::item_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
