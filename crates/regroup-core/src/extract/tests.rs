use super::*;

const ID_A: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";
const ID_B: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
const ID_C: &str = "16fd2706-8baf-433b-82eb-8c7fada847da";

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn lenient() -> ExtractOptions {
    ExtractOptions::default()
}

fn strict() -> ExtractOptions {
    ExtractOptions {
        strict_ids: true,
        ..ExtractOptions::default()
    }
}

#[test]
fn structured_array_round_trips_single_group() {
    let payload = r#"[{"groupName":"G1","reason":"r","memberIds":["a","b"]}]"#;
    let groups = extract(payload, &lenient()).expect("extract");
    assert_eq!(groups.labels(), vec!["G1"]);
    let g1 = groups.get("G1").expect("G1");
    assert_eq!(g1.reason, "r");
    assert_eq!(g1.members, ids(&["a", "b"]));
}

#[test]
fn structured_json_inside_fenced_block_is_found_despite_surrounding_brackets() {
    let payload = "Here is the result [draft]:\n```json\n[\n  {\"グループ名\": \"「読書クラブグループ」\", \"理由\": \"読書が共通の趣味であるため\", \"メンバーID\": [\"a\", \"b\"]}\n]\n```\nThanks [end]";
    let extraction = extract_detailed(payload, &lenient()).expect("extract");
    assert_eq!(extraction.path, "structured");
    let group = extraction
        .groups
        .get("「読書クラブグループ」")
        .expect("group");
    assert_eq!(group.reason, "読書が共通の趣味であるため");
    assert_eq!(group.members, ids(&["a", "b"]));
}

#[test]
fn structured_groups_envelope_and_keyed_object_shapes_are_accepted() {
    let envelope = r#"{"groups":[{"group_name":"Hikers","reason":"trails","member_ids":["h1","h2"]}]}"#;
    let groups = extract(envelope, &lenient()).expect("envelope");
    assert_eq!(groups.get("Hikers").expect("Hikers").members, ids(&["h1", "h2"]));

    let keyed = r#"{"Cooks": {"メンバーID": ["c1", 42], "理由": "food"}, "meta": "ignored"}"#;
    let groups = extract(keyed, &lenient()).expect("keyed");
    assert_eq!(groups.labels(), vec!["Cooks"]);
    let cooks = groups.get("Cooks").expect("Cooks");
    assert_eq!(cooks.members, ids(&["c1", "42"]));
    assert_eq!(cooks.reason, "food");
}

#[test]
fn line_based_fallback_matches_structured_equivalent() {
    let text = "\
Here are the groups.

「アウトドア愛好家グループ」
理由: 全員がアウトドア好き
メンバーID: [
  \"a\",
  \"b\",
  \"c\"
]
";
    let json = r#"[{"groupName":"「アウトドア愛好家グループ」","reason":"全員がアウトドア好き","memberIds":["a","b","c"]}]"#;

    let from_text = extract_detailed(text, &lenient()).expect("text");
    let from_json = extract_detailed(json, &lenient()).expect("json");
    assert_eq!(from_text.path, "line_based");
    assert_eq!(from_json.path, "structured");
    assert_eq!(from_text.groups, from_json.groups);
}

#[test]
fn line_based_reads_single_line_lists_and_markdown_headings() {
    let text = "\
# 統合グループ情報

## 甘党グループ
メンバー数: 2
理由: sweets
メンバーID: ['s1', 's2']

## 読書グループ
これらのメンバーは読書が好きです
- メンバーID: r1, r2
";
    let groups = extract(text, &lenient()).expect("extract");
    assert_eq!(groups.labels(), vec!["甘党グループ", "読書グループ"]);
    assert_eq!(groups.get("甘党グループ").expect("sweets").reason, "sweets");
    assert_eq!(
        groups.get("甘党グループ").expect("sweets").members,
        ids(&["s1", "s2"])
    );
    let books = groups.get("読書グループ").expect("books");
    assert_eq!(books.reason, "これらのメンバーは読書が好きです");
    assert_eq!(books.members, ids(&["r1", "r2"]));
}

#[test]
fn line_based_unclosed_list_ends_at_next_group_name() {
    let text = "\
山グループ
メンバーID: [\"m1\",
\"m2\",
海グループ
メンバーID: [\"s1\"]
";
    let groups = extract(text, &lenient()).expect("extract");
    assert_eq!(groups.get("山グループ").expect("mountain").members, ids(&["m1", "m2"]));
    assert_eq!(groups.get("海グループ").expect("sea").members, ids(&["s1"]));
}

#[test]
fn line_based_list_closes_on_bracket_followed_by_trailing_text() {
    let text = "\
山グループ
メンバーID: [
\"a\",
\"b\"
],
メンバー数: 2
理由: 登山

海グループ
メンバーID: [\"c\",
\"d\"] (2名)
理由: 海水浴
";
    let groups = extract(text, &lenient()).expect("extract");
    let mountain = groups.get("山グループ").expect("mountain");
    assert_eq!(mountain.members, ids(&["a", "b"]));
    assert_eq!(mountain.reason, "登山");
    let sea = groups.get("海グループ").expect("sea");
    assert_eq!(sea.members, ids(&["c", "d"]));
    assert_eq!(sea.reason, "海水浴");
}

#[test]
fn line_based_single_line_list_ignores_text_after_bracket() {
    let groups = extract("川グループ\nメンバーID: [r1, r2] (2名)\n", &lenient()).expect("extract");
    assert_eq!(groups.get("川グループ").expect("river").members, ids(&["r1", "r2"]));
}

#[test]
fn line_based_list_may_open_on_line_after_marker() {
    let text = "\
山グループ
メンバーID:
[
\"a\", \"b\"
]
理由: 登山

海グループ
メンバーID:
理由: 泳ぐ
";
    let groups = extract(text, &lenient()).expect("extract");
    assert_eq!(groups.labels(), vec!["山グループ"]);
    let mountain = groups.get("山グループ").expect("mountain");
    assert_eq!(mountain.members, ids(&["a", "b"]));
    assert_eq!(mountain.reason, "登山");
}

#[test]
fn empty_member_label_does_not_block_group_name_lines() {
    let options = ExtractOptions {
        strict_ids: false,
        markers: LineMarkers {
            member_label: String::new(),
            ..LineMarkers::default()
        },
    };
    let groups = extract("山グループ\nメンバーID: [m1]\n", &options).expect("extract");
    assert_eq!(groups.get("山グループ").expect("mountain").members, ids(&["m1"]));
}

#[test]
fn line_based_merges_repeated_labels_and_keeps_first_reason() {
    let text = "\
山グループ
メンバーID: [\"m1\"]
山グループ
理由: second
メンバーID: [\"m2\"]
";
    let groups = extract(text, &lenient()).expect("extract");
    assert_eq!(groups.len(), 1);
    let mountain = groups.get("山グループ").expect("mountain");
    assert_eq!(mountain.members, ids(&["m1", "m2"]));
    assert_eq!(mountain.reason, "second");
}

#[test]
fn english_markers_drive_line_based_parser() {
    let options = ExtractOptions {
        strict_ids: false,
        markers: LineMarkers::english(),
    };
    let text = "\
**Outdoor Group**
Reason: likes hiking
Member IDs: [
  e1, e2
]
";
    let groups = extract(text, &options).expect("extract");
    let outdoor = groups.get("Outdoor Group").expect("outdoor");
    assert_eq!(outdoor.reason, "likes hiking");
    assert_eq!(outdoor.members, ids(&["e1", "e2"]));
}

#[test]
fn strict_mode_drops_non_uuid_members_and_reports_them() {
    let payload = format!(
        r#"[{{"groupName":"G","reason":"","memberIds":[" {ID_A} ","emp-7","{ID_B}","12345678-abcd-efgh-ijkl-abc123456789"]}}]"#
    );
    let extraction = extract_detailed(&payload, &strict()).expect("extract");
    assert_eq!(
        extraction.groups.get("G").expect("G").members,
        ids(&[ID_A, ID_B])
    );
    assert_eq!(
        extraction.rejected_ids,
        ids(&["emp-7", "12345678-abcd-efgh-ijkl-abc123456789"])
    );

    let lenient_groups = extract(&payload, &lenient()).expect("lenient");
    assert_eq!(lenient_groups.get("G").expect("G").members.len(), 4);
}

#[test]
fn strict_mode_keeps_group_even_when_every_member_is_rejected() {
    let payload = r#"[{"groupName":"G","memberIds":["x","y"]}]"#;
    let groups = extract(payload, &strict()).expect("extract");
    assert_eq!(groups.len(), 1);
    assert!(groups.get("G").expect("G").members.is_empty());
}

#[test]
fn empty_json_array_is_an_empty_result_not_an_error() {
    let groups = extract("```json\n[]\n```", &lenient()).expect("extract");
    assert!(groups.is_empty());
}

#[test]
fn unparseable_payload_is_an_extraction_error() {
    let err = extract("I could not group these employees.", &lenient()).expect_err("no groups");
    assert_eq!(err.code(), "EXTRACTION_FAILED");
}

#[test]
fn extract_all_merges_chunks_in_order_and_skips_failed_chunks() {
    let chunks = [
        format!(r#"[{{"groupName":"G","reason":"","memberIds":["{ID_A}"]}}]"#),
        "garbage without groups".to_string(),
        format!(
            r#"[{{"groupName":"H","reason":"h","memberIds":["{ID_C}"]}},{{"groupName":"G","reason":"g","memberIds":["{ID_B}"]}}]"#
        ),
    ];
    let extraction = extract_all(&chunks, &strict()).expect("extract_all");
    assert_eq!(extraction.groups.labels(), vec!["G", "H"]);
    let g = extraction.groups.get("G").expect("G");
    assert_eq!(g.members, ids(&[ID_A, ID_B]));
    assert_eq!(g.reason, "g");
}

#[test]
fn extract_all_fails_only_when_every_chunk_fails() {
    let err = extract_all(["nothing", "still nothing"], &lenient()).expect_err("all failed");
    assert_eq!(err.code(), "EXTRACTION_FAILED");
    let err = extract_all(Vec::<String>::new(), &lenient()).expect_err("no chunks");
    assert!(err.to_string().contains("no response"));
}

#[test]
fn parse_payload_reports_selected_path() {
    let structured = parse_payload(r#"[{"name":"A","members":["1"]}]"#, &LineMarkers::default())
        .expect("structured");
    assert!(matches!(structured, ParsedPayload::Structured(_)));
    assert_eq!(structured.groups().len(), 1);

    let line = parse_payload("Aグループ\nメンバーID: 1, 2", &LineMarkers::default())
        .expect("line");
    assert!(matches!(line, ParsedPayload::LineBased(_)));
    assert_eq!(line.into_groups()[0].members, ids(&["1", "2"]));
}
