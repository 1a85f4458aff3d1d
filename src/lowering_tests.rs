//! End-to-end lowering of markup elements and fragments.

#[cfg(test)]
mod tests {
    use crate::options::CompileOptions;
    use crate::transform::{transform, TransformOutput};

    fn compile_with(code: &str, options: CompileOptions) -> TransformOutput {
        transform(code, "test.tsx", &options).expect("module should compile")
    }

    fn compile(code: &str) -> TransformOutput {
        compile_with(
            code,
            CompileOptions {
                source_map: false,
                log_warnings: false,
                ..CompileOptions::default()
            },
        )
    }

    #[test]
    fn test_static_element() {
        let out = compile(r#"const a = <div class="a">hi</div>;"#);
        assert_eq!(
            out.code,
            "import { html } from \"kaori.js\";\nconst a = html`<div class=\"a\">hi</div>`;"
        );
        assert_eq!(out.imports, vec!["html"]);
    }

    #[test]
    fn test_event_binding() {
        let out = compile("const a = <button onClick={save}>Go</button>;");
        assert!(out.code.contains("html`<button @click=${save}>Go</button>`"));
    }

    #[test]
    fn test_namespaced_bindings() {
        let out = compile(r##"const a = <input prop:value={v} bool:checked={on} xlink:href="#a" />;"##);
        assert!(out
            .code
            .contains(r##"html`<input .value=${v} ?checked=${on} xlink:href=${"#a"} />`"##));
    }

    #[test]
    fn test_bare_attribute_is_true() {
        let out = compile("const a = <input disabled />;");
        assert!(out.code.contains("html`<input disabled=${true} />`"));
    }

    #[test]
    fn test_class_name_normalized() {
        let out = compile("const a = <p className={cls} />;");
        assert!(out.code.contains("html`<p class=${cls}></p>`"));
        let out = compile(r#"const a = <p className="lead" />;"#);
        assert!(out.code.contains(r#"html`<p class="lead"></p>`"#));
    }

    #[test]
    fn test_ref_and_style_helpers() {
        let out = compile("const a = <div ref={divRef} style={styles}>x</div>;");
        assert!(out
            .code
            .contains("html`<div ${ref(divRef)} style=${styleMap(styles)}>x</div>`"));
        assert!(out
            .code
            .starts_with("import { html, ref, styleMap } from \"kaori.js\";\n"));
    }

    #[test]
    fn test_style_shapes() {
        for value in ["{ color: 'red' }", "theme.styles", "getStyles()", "on ? a : b", "a || b"] {
            let out = compile(&format!("const a = <div style={{{}}} />;", value));
            assert!(out.code.contains(&format!("style=${{styleMap({})}}", value)), "{}", value);
        }
        let out = compile(r#"const a = <div style="color: red" />;"#);
        assert!(out.code.contains(r#"<div style="color: red"></div>"#));
        assert!(!out.code.contains("styleMap"));
        let out = compile("const a = <div style={`color: ${c}`} />;");
        assert!(out.code.contains("style=${`color: ${c}`}"));
        assert!(!out.code.contains("styleMap"));
    }

    #[test]
    fn test_class_map_helper() {
        let out = compile("const a = <div classMap={{ active: isActive }} />;");
        assert!(out
            .code
            .contains("html`<div class=${classMap({ active: isActive })}></div>`"));
        let out = compile(r#"const a = <div classMap="fixed" />;"#);
        assert!(out.code.contains(r#"<div class="fixed"></div>"#));
    }

    #[test]
    fn test_spread_on_element() {
        let out = compile("const a = <input type=\"text\" {...props1} placeholder=\"Enter\" {...props2} />;");
        assert!(out.code.contains(
            "html`<input type=\"text\" ${spread(props1)} placeholder=\"Enter\" ${spread(props2)} />`"
        ));
        assert!(out.code.starts_with("import { html, spread } from \"kaori.js\";"));
    }

    #[test]
    fn test_nested_elements_share_one_template() {
        let out = compile("const a = <ul><li>{item}</li></ul>;");
        assert!(out.code.contains("html`<ul><li>${item}</li></ul>`"));
    }

    #[test]
    fn test_static_subtree_inlined() {
        let out = compile(r#"const a = <div><span class="x" hidden>a</span>{b}</div>;"#);
        assert!(out
            .code
            .contains(r#"html`<div><span class="x" hidden>a</span>${b}</div>`"#));
    }

    #[test]
    fn test_formatting_whitespace_dropped() {
        let out = compile("const a = (\n  <div>\n    <span>a</span> <b>c</b>\n  </div>\n);");
        assert!(out.code.contains("html`<div><span>a</span> <b>c</b></div>`"));
    }

    #[test]
    fn test_inline_whitespace_can_be_dropped() {
        let out = compile_with(
            "const a = <p><b>a</b> <i>b</i></p>;",
            CompileOptions {
                preserve_inline_whitespace: false,
                source_map: false,
                log_warnings: false,
                ..CompileOptions::default()
            },
        );
        assert!(out.code.contains("html`<p><b>a</b><i>b</i></p>`"));
    }

    #[test]
    fn test_text_keeps_inline_spacing() {
        let out = compile("const a = <p>Hello, {name}!</p>;");
        assert!(out.code.contains("html`<p>Hello, ${name}!</p>`"));
    }

    #[test]
    fn test_template_text_is_escaped() {
        let out = compile("const a = <p>use `code` and \\n</p>;");
        assert!(out.code.contains("html`<p>use \\`code\\` and \\\\n</p>`"));
    }

    #[test]
    fn test_void_elements_have_no_children_section() {
        let out = compile(r#"const a = <div><img src="a.png" /><br /></div>;"#);
        assert!(out.code.contains(r#"html`<div><img src="a.png" /><br /></div>`"#));
    }

    #[test]
    fn test_component_inside_element_is_bare_hole() {
        let out = compile(r#"const a = <div><Header title="x" /></div>;"#);
        assert!(out
            .code
            .contains(r#"html`<div>${component(Header, { title: "x" })}</div>`"#));
    }

    #[test]
    fn test_jsx_inside_expression_holes() {
        let out = compile("const a = <ul>{items.map(i => <li>{i}</li>)}</ul>;");
        assert!(out
            .code
            .contains("html`<ul>${items.map(i => html`<li>${i}</li>`)}</ul>`"));
    }

    #[test]
    fn test_jsx_in_attribute_value() {
        let out = compile("const a = <div title={ok ? <b>yes</b> : 'no'} />;");
        assert!(out
            .code
            .contains("html`<div title=${ok ? html`<b>yes</b>` : 'no'}></div>`"));
    }

    #[test]
    fn test_fragments_collapse_by_arity() {
        let out = compile("const a = <></>;");
        assert!(out.code.contains("const a = html``;"));

        let out = compile("const a = <>{x}</>;");
        assert!(out.code.contains("const a = html`${x}`;"));

        let out = compile("const a = <><A /><B /></>;");
        assert!(out
            .code
            .contains("const a = [component(A, {}), component(B, {})];"));
        assert_eq!(out.imports, vec!["component"]);
    }

    #[test]
    fn test_fragment_text_is_trimmed_literal() {
        let out = compile("const a = <>\n  Hello\n  <b>x</b>\n</>;");
        assert!(out.code.contains("const a = [\"Hello\", html`<b>x</b>`];"));
    }

    #[test]
    fn test_fragment_inside_element_is_spliced() {
        let out = compile("const a = <div><>{a}<i>b</i></></div>;");
        assert!(out.code.contains("html`<div>${a}<i>b</i></div>`"));
    }

    #[test]
    fn test_multiple_roots_in_module() {
        let out = compile("function A() { return <a />; }\nfunction B() { return <b />; }\n");
        assert!(out.code.contains("return html`<a></a>`;"));
        assert!(out.code.contains("return html`<b></b>`;"));
        assert_eq!(out.code.matches("import {").count(), 1);
    }

    #[test]
    fn test_typescript_module() {
        let out = transform(
            "const el: HTMLElement | null = null;\nconst a = <p>{el as any}</p>;",
            "view.tsx",
            &CompileOptions::default(),
        )
        .unwrap();
        assert!(out.code.contains("html`<p>${el as any}</p>`"));
    }

    #[test]
    fn test_entities_stay_encoded_in_markup() {
        let out = compile("const a = <p title=\"a &amp; b\">x &amp; y</p>;");
        assert!(out
            .code
            .contains(r#"html`<p title="a &amp; b">x &amp; y</p>`"#));
    }

    #[test]
    fn test_sequence_inside_helper_call() {
        let out = compile("const a = <div ref={(track(), el)} />;");
        assert!(out.code.contains("${ref((track(), el))}"));
        let out = compile("const a = <div ref={track(), el} />;");
        assert!(out.code.contains("${ref((track(), el))}"));
    }

    #[test]
    fn test_spread_children_in_fragments() {
        let out = compile("const a = <>{...items}</>;");
        assert!(out.code.contains("const a = html`${[...items]}`;"));

        let out = compile("const a = <>{head}{...items}</>;");
        assert!(out.code.contains("const a = [head, ...items];"));

        let out = compile("const a = <ul>{...items}</ul>;");
        assert!(out.code.contains("html`<ul>${items}</ul>`"));
    }
}
