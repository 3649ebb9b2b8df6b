use quickaudit::algorithm::{parse_transcript, AvailablePool};
use quickaudit::models::TranscriptRow;
use serde_json::json;

#[test]
fn test_expediente_completo() {
    let rows: Vec<TranscriptRow> = serde_json::from_value(json!([
        { "courseId": "comp sci 300", "grade": "A", "credits": 3 },
        { "subject": "MATH", "number": 221, "grade": "IP", "credits": 5 },
        { "subject": "STAT", "number": "301", "grade": "b", "credits": -2 },
        { "courseId": "ECON 101", "credits": "4.0" }
    ]))
    .unwrap();

    let courses = parse_transcript(&rows);
    // se conservan todas las filas, también las no completadas
    assert_eq!(courses.len(), 4);
    assert_eq!(courses[0].course_id, "COMP SCI 300");
    assert!(!courses[1].completed);
    assert_eq!(courses[1].course_id, "MATH 221");
    assert_eq!(courses[2].credits, 0.0);
    assert_eq!(courses[3].credits, 4.0);

    let pool = AvailablePool::from_courses(&courses);
    assert_eq!(pool.len(), 3);
    assert!(!pool.contains("MATH 221"));
    assert!(pool.contains("STAT 301"));
}
