//! Deserialize representative backend payloads into entity types.

use manabi_core::entities::{Chapter, LearningPath, Page, Post, UnitKind};
use manabi_core::ordering::order_units;
use pretty_assertions::assert_eq;

const CHAPTER: &str = r#"{
    "id": 12,
    "courseId": 42,
    "title": "第3章 助詞",
    "position": 3,
    "units": [
        {"id": 301, "chapterId": 12, "title": "確認テスト", "kind": "quiz", "position": 1, "prerequisiteId": 303},
        {"id": 302, "chapterId": 12, "title": "「は」と「が」", "kind": "grammar", "position": 2},
        {"id": 303, "chapterId": 12, "title": "「に」と「で」", "kind": "grammar", "position": 3, "prerequisiteId": 302}
    ]
}"#;

#[test]
fn chapter_units_order_by_prerequisite() {
    let chapter: Chapter = serde_json::from_str(CHAPTER).expect("chapter parses");
    assert_eq!(chapter.units[0].kind, UnitKind::Quiz);

    let ordered = order_units(&chapter.units).expect("acyclic");
    let ids: Vec<i64> = ordered.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![302, 303, 301]);
}

#[test]
fn paged_posts_parse_with_nested_authors() {
    let json = r#"{
        "content": [
            {"id": 1, "topicId": 2, "title": "敬語の使い方", "content": "…", "author": {"id": 5, "username": "yuki"}, "likeCount": 4, "createdAt": "2026-03-01T09:00:00Z"}
        ],
        "totalElements": 1,
        "number": 0,
        "size": 20
    }"#;
    let page: Page<Post> = serde_json::from_str(json).expect("page parses");
    assert_eq!(page.total, 1);
    let post = &page.items[0];
    assert_eq!(post.author.as_ref().map(|a| a.username.as_str()), Some("yuki"));
    assert_eq!(post.like_count, 4);
    assert!(post.created_at.is_some());
}

#[test]
fn learning_path_reorder_round_trips_through_json() {
    let json = r#"{"id": 8, "title": "JLPT N5", "courses": [
        {"courseId": 1, "title": "ひらがな", "position": 1},
        {"courseId": 2, "title": "カタカナ", "position": 2},
        {"courseId": 3, "title": "基本文法", "position": 3}
    ]}"#;
    let mut path: LearningPath = serde_json::from_str(json).expect("path parses");
    path.move_course(2, 0).expect("in range");

    let value = serde_json::to_value(&path).expect("serializes");
    assert_eq!(value["courses"][0]["courseId"], 3);
    assert_eq!(value["courses"][0]["position"], 1);
    assert_eq!(value["courses"][2]["courseId"], 2);
}
