use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_formbookd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn formbookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(true),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_default()
}

fn error_code(value: &serde_json::Value) -> &str {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

fn to_preview(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    students: usize,
) {
    let text = (1..=students)
        .map(|i| format!("تلميذ {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let _ = request_ok(stdin, reader, "p1", "roster.importText", json!({ "text": text }));
    let _ = request_ok(stdin, reader, "p2", "workflow.next", json!({}));
    let _ = request_ok(stdin, reader, "p3", "workflow.next", json!({}));
}

fn select_all(stdin: &mut ChildStdin, reader: &mut BufReader<ChildStdout>) {
    for id in ["performance", "attendance", "separator"] {
        let _ = request_ok(
            stdin,
            reader,
            &format!("sel-{}", id),
            "documents.toggle",
            json!({ "id": id }),
        );
    }
}

fn kinds(pages: &serde_json::Value) -> Vec<String> {
    pages["pages"]
        .as_array()
        .expect("pages")
        .iter()
        .map(|p| p["kind"].as_str().expect("kind").to_string())
        .collect()
}

#[test]
fn every_form_has_its_fixed_number_of_rows() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    to_preview(&mut stdin, &mut reader, 25);
    select_all(&mut stdin, &mut reader);

    let pages = request_ok(&mut stdin, &mut reader, "1", "print.pages", json!({}));
    assert_eq!(
        kinds(&pages),
        vec!["diagnostic", "achievement", "performance", "attendance", "separator"]
    );
    let expected = [
        ("assessment", 40),
        ("assessment", 40),
        ("performance", 40),
        ("attendance", 35),
    ];
    for (i, (body_type, rows)) in expected.iter().enumerate() {
        let body = &pages["pages"][i]["body"];
        assert_eq!(body["type"], *body_type);
        let list = body["rows"].as_array().expect("rows");
        assert_eq!(list.len(), *rows, "page {}", i);
        assert_eq!(list[24]["studentId"], 25);
        assert!(list[25]["studentId"].is_null());
        assert_eq!(list[25]["name"], "");
        assert_eq!(list[25]["cells"]["kind"], "blank");
    }
    let sep = &pages["pages"][4];
    assert_eq!(sep["body"]["type"], "separator");
    assert_eq!(sep["body"]["term"], "الفصل الأول");
    assert_eq!(sep["body"]["subtitle"], "دفتر متابعة التقويم التربوي");
    assert_eq!(sep["body"]["field"], "الحركات القاعدية");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn exempted_rows_use_merged_cells_except_on_attendance() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    to_preview(&mut stdin, &mut reader, 4);
    select_all(&mut stdin, &mut reader);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "roster.applyExemptions",
        json!({ "text": "3" }),
    );

    let pages = request_ok(&mut stdin, &mut reader, "2", "print.pages", json!({}));
    let diag = &pages["pages"][0]["body"]["rows"][2];
    assert_eq!(diag["cells"]["kind"], "merged");
    assert_eq!(diag["cells"]["span"], 20);
    assert_eq!(diag["cells"]["label"], "معفـــــــــي");
    assert_eq!(diag["remark"], "معفى");

    let perf = &pages["pages"][2]["body"]["rows"][2];
    assert_eq!(perf["cells"]["kind"], "merged");
    assert_eq!(perf["cells"]["span"], 6);
    assert_eq!(perf["remark"], "معفى");

    let attendance = &pages["pages"][3];
    assert_eq!(attendance["orientation"], "landscape");
    assert_eq!(attendance["widthMm"], 297);
    assert_eq!(attendance["heightMm"], 210);
    let row = &attendance["body"]["rows"][2];
    assert_eq!(row["cells"]["kind"], "coded");
    assert_eq!(row["cells"]["count"], 36);
    assert_eq!(row["cells"]["code"], "X");
    assert_eq!(attendance["body"]["rows"][1]["cells"]["kind"], "blank");

    drop(stdin);
    let _ = child.wait();
}

fn section<'a>(html: &'a str, kind: &str) -> &'a str {
    let marker = format!(r#"data-kind="{}""#, kind);
    let start = html.find(&marker).expect("page section");
    let rest = &html[start..];
    let end = rest.find("</section>").expect("section end");
    &rest[..end]
}

#[test]
fn printed_document_matches_the_page_models() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    to_preview(&mut stdin, &mut reader, 3);
    select_all(&mut stdin, &mut reader);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "roster.toggleExempt",
        json!({ "id": 2 }),
    );
    let doc = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "print.document",
        json!({ "mode": "print" }),
    );
    let html = doc["html"].as_str().expect("html");

    for (kind, capacity) in [("diagnostic", 40), ("performance", 40), ("attendance", 35)] {
        let page = section(html, kind);
        assert!(page.contains(r#"<td class="num">3</td>"#), "{}", kind);
        assert!(!page.contains(r#"<td class="num">4</td>"#), "{}", kind);
        assert_eq!(
            page.matches(r#"<td class="num"></td>"#).count(),
            capacity - 3,
            "{}",
            kind
        );
        assert_eq!(page.matches(r#"<tr class="exempted">"#).count(), 1, "{}", kind);
        assert!(page.contains(r#"<tr class="exempted"><td class="num">2</td>"#));
    }

    let diagnostic = section(html, "diagnostic");
    assert!(diagnostic.contains(r#"<td class="exempt" colspan="20">معفـــــــــي</td><td class="remark">معفى</td>"#));
    let performance = section(html, "performance");
    assert!(performance.contains(r#"<td class="exempt" colspan="6">"#));

    let attendance = section(html, "attendance");
    assert_eq!(attendance.matches(r#"<td class="code">X</td>"#).count(), 36);
    assert!(!attendance.contains(r#"class="exempt""#));
    assert!(!attendance.contains("الميدان"));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn deselected_and_hidden_documents_are_left_out() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    to_preview(&mut stdin, &mut reader, 3);
    select_all(&mut stdin, &mut reader);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "documents.toggle",
        json!({ "id": "achievement" }),
    );
    let listed = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "documents.toggleVisible",
        json!({ "id": "performance" }),
    );
    assert_eq!(
        listed["printOrder"],
        json!(["diagnostic", "attendance", "separator"])
    );

    let pages = request_ok(&mut stdin, &mut reader, "3", "print.pages", json!({}));
    assert_eq!(kinds(&pages), vec!["diagnostic", "attendance", "separator"]);

    let doc = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "print.document",
        json!({ "mode": "print" }),
    );
    let html = doc["html"].as_str().expect("html");
    assert_eq!(doc["pageCount"], 3);
    assert_eq!(html.matches("<section class=\"page ").count(), 3);
    assert!(html.contains(r#"data-kind="attendance""#));
    assert!(!html.contains(r#"data-kind="achievement""#));
    assert!(!html.contains(r#"data-kind="performance""#));

    let bad = request(
        &mut stdin,
        &mut reader,
        "5",
        "documents.toggle",
        json!({ "id": "report-card" }),
    );
    assert_eq!(error_code(&bad), "bad_params");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn empty_selection_renders_no_pages() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    to_preview(&mut stdin, &mut reader, 2);
    for id in ["diagnostic", "achievement"] {
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            id,
            "documents.toggle",
            json!({ "id": id }),
        );
    }
    let pages = request_ok(&mut stdin, &mut reader, "1", "print.pages", json!({}));
    assert_eq!(pages["count"], 0);
    let doc = request_ok(&mut stdin, &mut reader, "2", "print.document", json!({}));
    let html = doc["html"].as_str().expect("html");
    assert!(html.contains("لم يتم اختيار أي وثيقة"));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn margins_reach_every_page() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    to_preview(&mut stdin, &mut reader, 2);
    select_all(&mut stdin, &mut reader);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "layout.nudge",
        json!({ "field": "top", "steps": -3 }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "layout.nudge",
        json!({ "field": "left", "steps": -25 }),
    );
    let layout = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "layout.nudge",
        json!({ "field": "verticalOffset", "steps": -2 }),
    );
    assert_eq!(layout["margins"]["top"], 7);
    assert_eq!(layout["margins"]["left"], 0);
    assert_eq!(layout["margins"]["verticalOffset"], -10);
    let layout = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "layout.nudge",
        json!({ "field": "right" }),
    );
    assert_eq!(layout["margins"]["right"], 11);

    let pages = request_ok(&mut stdin, &mut reader, "5", "print.pages", json!({}));
    for page in pages["pages"].as_array().expect("pages") {
        assert_eq!(page["frame"]["paddingTopMm"], 7);
        assert_eq!(page["frame"]["paddingLeftMm"], 0);
        assert_eq!(page["frame"]["paddingRightMm"], 11);
        assert_eq!(page["frame"]["paddingBottomMm"], 10);
        assert_eq!(page["frame"]["offsetTopPx"], -10);
    }

    let bad = request(
        &mut stdin,
        &mut reader,
        "6",
        "layout.nudge",
        json!({ "field": "gutter", "steps": 1 }),
    );
    assert_eq!(error_code(&bad), "bad_params");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn students_past_capacity_are_reported() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    to_preview(&mut stdin, &mut reader, 42);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "documents.toggle",
        json!({ "id": "attendance" }),
    );
    let pages = request_ok(&mut stdin, &mut reader, "2", "print.pages", json!({}));
    assert_eq!(pages["pages"][0]["omittedStudents"], 2);
    let attendance = &pages["pages"][2];
    assert_eq!(attendance["kind"], "attendance");
    assert_eq!(attendance["omittedStudents"], 7);
    let rows = attendance["body"]["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 35);
    assert_eq!(rows[34]["studentId"], 35);

    drop(stdin);
    let _ = child.wait();
}
