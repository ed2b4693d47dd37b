use snap2js_core::{translate_xml, TranslateError, TranslateOptions};

const SAMPLE: &str = include_str!("fixtures/sampleproject.xml");

fn expected_sample() -> String {
    [
        "var turtleBot, turtleBot_;",
        "",
        "turtleBot = new Sprite();",
        "",
        "turtleBot.onReceiveGo(function () {",
        "\twhile (true) {",
        "\t\tthis.forward(10);",
        "\t\tif ((3 + 4) > 5) {",
        "\t\t\tthis.turn(15);",
        "\t\t}",
        "\t}",
        "});",
        "",
        "turtleBot.onReceiveClick(function () {",
        "\tthis.setColor(new Color(255, 0, 0));",
        "});",
        "",
        "turtleBot_ = new Sprite();",
        "",
        "turtleBot_.onReceiveMessage(function () {",
        "\t(3).times(function () {",
        "\t\tthis.turn(random(1, 10));",
        "\t})",
        "});",
    ]
    .join("\n")
}

#[test]
fn sample_project_translates() {
    let translation = translate_xml(SAMPLE, TranslateOptions::default()).expect("sample should translate");
    assert_eq!(translation.text, expected_sample());
    assert!(translation.warnings.is_empty());
}

#[test]
fn sample_project_is_clean_in_strict_mode() {
    let translation = translate_xml(SAMPLE, TranslateOptions { strict: true }).expect("strict translate");
    assert_eq!(translation.text, expected_sample());
}

#[test]
fn translation_is_deterministic() {
    let first = translate_xml(SAMPLE, TranslateOptions::default()).expect("first run");
    let second = translate_xml(SAMPLE, TranslateOptions::default()).expect("second run");
    assert_eq!(first.text, second.text);
}

#[test]
fn product_of_sum_is_parenthesized() {
    let source = r#"<project><stage><sprites><sprite name="Calc"><scripts><script>
        <block s="receiveGo"/>
        <block s="say">
          <block s="reportProduct">
            <block s="reportSum"><l>3</l><l>4</l></block>
            <block s="reportDifference"><l>9</l><l>2</l></block>
          </block>
        </block>
        <block s="myCustomBlock"><l>a</l><l>b</l></block>
    </script></scripts></sprite></sprites></stage></project>"#;
    let translation = translate_xml(source, TranslateOptions::default()).expect("translate");
    assert!(translation.text.contains("\tthis.say((3 + 4) * (9 - 2));\n"));
    assert!(translation.text.contains("\tthis.myCustomBlock(a, b);\n"));
}

#[test]
fn unknown_argument_shape_is_best_effort() {
    let source = r#"<project><stage><sprites><sprite name="Cat"><scripts><script>
        <block s="receiveGo"/>
        <block s="doSayFor"><comment>hi</comment><l>2</l></block>
    </script></scripts></sprite></sprites></stage></project>"#;
    let translation = translate_xml(source, TranslateOptions::default()).expect("translate");
    assert!(translation.text.contains("\tthis.doSayFor(undefined, 2);\n"));
    assert_eq!(translation.warnings.len(), 1);

    let err = translate_xml(source, TranslateOptions { strict: true }).expect_err("strict rejects");
    assert!(matches!(err, TranslateError::UnclassifiedArgument { ref tag, .. } if tag == "comment"));
}

#[test]
fn attribute_lookup_quotes_property_name() {
    let source = r#"<project><stage><sprites><sprite name="Cat"><scripts><script>
        <block s="receiveGo"/>
        <block s="say"><block s="reportAttributeOf"><l>x position</l><l>dog</l></block></block>
    </script></scripts></sprite></sprites></stage></project>"#;
    let translation = translate_xml(source, TranslateOptions::default()).expect("translate");
    assert!(translation.text.contains("\tthis.say(dog[\"x position\"]);\n"));
}
