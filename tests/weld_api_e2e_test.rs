// ==========================================
// 焊口记录 API 端到端测试
// ==========================================
// 模拟前端通过 HTTP 完成焊口记录 CRUD 的完整流程

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use test_helpers::{body_json, create_test_app, empty_request, json_request};

/// 测试焊口记录完整 CRUD 流程
#[tokio::test]
async fn test_weld_crud_full_flow() {
    println!("\n=== 测试焊口记录完整 CRUD 流程 ===\n");

    // 步骤 1: 装配测试应用
    let (_dir, app) = create_test_app();
    println!("✓ 步骤 1: 测试应用已装配");

    // 步骤 2: 创建记录
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/welds",
            json!({
                "date": "2024-01-15",
                "weld_number": "W-001",
                "welder": "张伟",
                "type_fit": "BW",
                "custom_fields": { "inspector": "王芳" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["id"].as_i64().expect("创建后应返回 id");
    assert_eq!(created["weld_number"], "W-001");
    assert_eq!(created["custom_fields"]["inspector"], "王芳");
    assert!(created["created_at"].is_string(), "应写入审计时间戳");
    println!("✓ 步骤 2: 记录已创建, id={}", id);

    // 步骤 3: 按 id 查询
    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/welds/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["welder"], "张伟");
    println!("✓ 步骤 3: 按 id 查询成功");

    // 步骤 4: 更新记录
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/welds/{}", id),
            json!({
                "date": "2024-01-15",
                "weld_number": "W-001",
                "welder": "李强",
                "vt": "ACC"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["welder"], "李强");
    assert_eq!(updated["vt"], "ACC");
    println!("✓ 步骤 4: 记录已更新");

    // 步骤 5: 删除记录
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/welds/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let message = body_json(response).await;
    assert_eq!(message["message"], "Weld deleted successfully");
    println!("✓ 步骤 5: 记录已删除");

    // 步骤 6: 删除后查询返回 404
    let response = app
        .oneshot(empty_request("GET", &format!("/api/welds/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["error"], "Weld not found");
    println!("✓ 步骤 6: 删除后查询返回 404");

    println!("\n=== 测试通过：焊口记录 CRUD 流程验证成功 ===\n");
}

/// 测试列表接口的搜索与日期过滤
#[tokio::test]
async fn test_weld_list_filters() {
    println!("\n=== 测试列表搜索与日期过滤 ===\n");

    let (_dir, app) = create_test_app();

    // 准备三条记录
    for (date, number, welder) in [
        ("2024-01-10", "W-001", "张伟"),
        ("2024-01-15", "W-002", "李强"),
        ("2024-01-20", "X-100", "张伟"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/welds",
                json!({ "date": date, "weld_number": number, "welder": welder }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    println!("✓ 准备了 3 条记录");

    // 搜索: weld_number 前缀匹配
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/welds?search=W-0"))
        .await
        .unwrap();
    let welds = body_json(response).await;
    assert_eq!(welds.as_array().unwrap().len(), 2);
    println!("✓ search=W-0 命中 2 条");

    // 日期区间（闭区间）
    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/welds?date_from=2024-01-15&date_to=2024-01-20",
        ))
        .await
        .unwrap();
    let welds = body_json(response).await;
    let welds = welds.as_array().unwrap();
    assert_eq!(welds.len(), 2);
    // 按日期倒序返回
    assert_eq!(welds[0]["weld_number"], "X-100");
    assert_eq!(welds[1]["weld_number"], "W-002");
    println!("✓ 日期区间过滤命中 2 条且按日期倒序");

    // 分页
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/welds?page=2&limit=2"))
        .await
        .unwrap();
    let welds = body_json(response).await;
    assert_eq!(welds.as_array().unwrap().len(), 1, "第二页应只剩 1 条");
    println!("✓ 分页第二页返回 1 条");

    // 极端分页参数只返回空页，不得溢出
    let response = app
        .oneshot(empty_request("GET", "/api/welds?page=4294967295&limit=500"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let welds = body_json(response).await;
    assert!(welds.as_array().unwrap().is_empty());
    println!("✓ 极端分页参数返回空页");
}
