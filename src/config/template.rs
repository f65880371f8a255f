/// Generate the template written by `tpf --init`.
pub fn generate_init_template() -> String {
	r##"# tpf configuration
#
# Stop looking for .tpf.yaml files in parent directories and skip ~/.tpf.yaml.
root: true

# Hide the contents of heredoc (<<-EOT ... EOT) strings.
eot: false

# Move change signs to the start of the line, like a unified diff.
diff: false

# Object sub-blocks to hide, keyed by resource type then resource name.
# The value is a regular expression matched against the quoted object name;
# matching blocks are replaced by a "# (N lines hidden: ...)" summary.
filters:
  helm_release:
    argocd: "customresourcedefinition.*"
"##
	.to_string()
}
