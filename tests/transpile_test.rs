use dotforge::transpile::{transpile, TranspileError};

#[test]
fn test_plain_text_passes_through() {
    let input = "just some text\nwith no actions\n";
    assert_eq!(transpile(input).unwrap(), input);
}

#[test]
fn test_plain_variable() {
    assert_eq!(transpile("{{ .email }}").unwrap(), "{{email}}");
    assert_eq!(transpile("{{ .personal.email }}").unwrap(), "{{personal.email}}");
}

#[test]
fn test_namespaced_variables_map_to_flat_names() {
    assert_eq!(transpile("{{ .chezmoi.os }}").unwrap(), "{{os}}");
    assert_eq!(transpile("{{ .chezmoi.arch }}").unwrap(), "{{arch}}");
    assert_eq!(transpile("{{ .chezmoi.hostname }}").unwrap(), "{{hostname}}");
    assert_eq!(transpile("{{ .chezmoi.username }}").unwrap(), "{{username}}");
    assert_eq!(transpile("{{ .chezmoi.homeDir }}").unwrap(), "{{home}}");
}

#[test]
fn test_unknown_namespaced_variable_passes_through() {
    let input = "{{ .chezmoi.kernel }}";
    assert_eq!(transpile(input).unwrap(), input);
}

#[test]
fn test_filter_with_argument() {
    assert_eq!(
        transpile("{{ .name | default \"anon\" }}").unwrap(),
        "{{default name \"anon\"}}"
    );
}

#[test]
fn test_filter_without_argument() {
    assert_eq!(transpile("{{ .email | quote }}").unwrap(), "{{quote email}}");
}

#[test]
fn test_chained_filters_nest() {
    assert_eq!(
        transpile("{{ .email | lower | quote }}").unwrap(),
        "{{quote (lower email)}}"
    );
}

#[test]
fn test_truthy_conditional() {
    assert_eq!(
        transpile("{{ if .work }}on{{ end }}").unwrap(),
        "{{#if work}}on{{/if}}"
    );
}

#[test]
fn test_negated_conditional_uses_unless() {
    assert_eq!(
        transpile("{{ if not .work }}off{{ end }}").unwrap(),
        "{{#unless work}}off{{/unless}}"
    );
}

#[test]
fn test_namespaced_equality_conditional() {
    // {{ end }} resolves to the default conditional closer.
    assert_eq!(
        transpile("{{ if eq .chezmoi.os \"darwin\" }}mac{{ else }}other{{ end }}").unwrap(),
        "{{#if (eq os \"darwin\")}}mac{{else}}other{{/if}}"
    );
}

#[test]
fn test_arbitrary_variable_inequality() {
    assert_eq!(
        transpile("{{ if ne .profile \"work\" }}home{{ end }}").unwrap(),
        "{{#if (ne profile \"work\")}}home{{/if}}"
    );
}

#[test]
fn test_else_if_chain() {
    let input = "{{ if eq .chezmoi.os \"darwin\" }}a{{ else if eq .chezmoi.os \"linux\" }}b{{ else }}c{{ end }}";
    assert_eq!(
        transpile(input).unwrap(),
        "{{#if (eq os \"darwin\")}}a{{else if (eq os \"linux\")}}b{{else}}c{{/if}}"
    );
}

#[test]
fn test_iteration_closer_is_each() {
    // The generic end must become the iteration closer, not the default
    // conditional one.
    assert_eq!(
        transpile("{{ range .items }}{{ . }}{{ end }}").unwrap(),
        "{{#each items}}{{this}}{{/each}}"
    );
}

#[test]
fn test_nested_blocks_get_matching_closers() {
    let input = "{{ if .a }}{{ range .xs }}{{ . }}{{ end }}{{ end }}";
    assert_eq!(
        transpile(input).unwrap(),
        "{{#if a}}{{#each xs}}{{this}}{{/each}}{{/if}}"
    );
}

#[test]
fn test_sibling_blocks_on_one_line() {
    let input = "{{ if .a }}x{{ end }}{{ range .xs }}y{{ end }}{{ if not .b }}z{{ end }}";
    assert_eq!(
        transpile(input).unwrap(),
        "{{#if a}}x{{/if}}{{#each xs}}y{{/each}}{{#unless b}}z{{/unless}}"
    );
}

#[test]
fn test_whitespace_trim_markers_are_dropped() {
    assert_eq!(
        transpile("{{- if .a -}}x{{- end -}}").unwrap(),
        "{{#if a}}x{{/if}}"
    );
}

#[test]
fn test_literal_text_is_preserved_exactly() {
    let input = "export EDITOR=vim\n{{ if .work }}\nexport HTTP_PROXY=proxy:8080\n{{ end }}\n";
    assert_eq!(
        transpile(input).unwrap(),
        "export EDITOR=vim\n{{#if work}}\nexport HTTP_PROXY=proxy:8080\n{{/if}}\n"
    );
}

#[test]
fn test_unrecognized_action_passes_through() {
    let input = "{{ template \"helpers\" . }}";
    assert_eq!(transpile(input).unwrap(), input);
}

#[test]
fn test_unclosed_block_is_rejected() {
    let err = transpile("before\n{{ if .a }}\nno closer").unwrap_err();
    assert_eq!(err, TranspileError::UnclosedBlock { line: 2 });
}

#[test]
fn test_extra_closer_is_rejected() {
    let err = transpile("text{{ end }}").unwrap_err();
    assert_eq!(err, TranspileError::UnexpectedCloser { line: 1 });
}

#[test]
fn test_dangling_else_is_rejected() {
    let err = transpile("{{ else }}").unwrap_err();
    assert_eq!(err, TranspileError::DanglingElse { line: 1 });
}
