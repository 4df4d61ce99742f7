use crate::Fragment;
use crate::Template;

/// The built-in abbreviations for Lisp buffers, in registration order.
///
/// `np` appears twice: `null ` first and `numberp ` second. Registration is
/// last-wins, so `np` expands to `numberp `.
pub fn default_abbrevs() -> Vec<(&'static str, Template)> {
	vec![
		// Single letters only fire in callable position.
		("a", Template::literal("and ")),
		("o", Template::literal("or ")),
		("i", Template::literal("if ")),
		("w", Template::literal("when ")),
		("u", Template::literal("unless ")),
		("n", Template::literal("not ")),
		("l", Template::literal("lambda ")),
		("p", Template::literal("progn ")),
		("c", Template::literal("cond ")),
		("s", Template::literal("setq ")),
		("f", Template::literal("funcall ")),
		("m", Template::literal("mapcar ")),
		("lt", Template::cursor("let ((", "))")),
		("ls", Template::cursor("let* ((", "))")),
		("df", Template::cursor("defun ", " ()")),
		("dm", Template::cursor("defmacro ", " ()")),
		("dv", Template::cursor("defvar ", " nil")),
		("dc", Template::cursor("defconst ", " nil")),
		("dl", Template::cursor("dolist (", ")")),
		("dt", Template::cursor("dotimes (", ")")),
		("wl", Template::literal("while ")),
		("ap", Template::literal("apply ")),
		("cc", Template::literal("condition-case ")),
		("up", Template::literal("unwind-protect ")),
		("sx", Template::literal("save-excursion ")),
		("wcb", Template::literal("with-current-buffer ")),
		("ah", Template::literal("add-hook '")),
		("ms", Template::cursor("message \"", "\"")),
		("fm", Template::cursor("format \"", "\"")),
		("ins", Template::literal("insert ")),
		("gk", Template::literal("global-set-key ")),
		("dk", Template::literal("define-key ")),
		("sp", Template::literal("stringp ")),
		("lp", Template::literal("listp ")),
		("np", Template::literal("null ")),
		("np", Template::literal("numberp ")),
		("sy", Template::literal("symbolp ")),
		("ca", Template::literal("car ")),
		("cd", Template::literal("cdr ")),
		("ct", Template::literal("concat ")),
		(
			"dfi",
			Template::skeleton([
				Fragment::text("defun "),
				Fragment::Stop,
				Fragment::text(" ("),
				Fragment::Stop,
				Fragment::text(")"),
				Fragment::Newline,
				Fragment::text("\""),
				Fragment::Stop,
				Fragment::text("\""),
				Fragment::Newline,
				Fragment::text("(interactive)"),
				Fragment::Newline,
				Fragment::Stop,
			]),
		),
		(
			"dfs",
			Template::skeleton([
				Fragment::text("cl-defstruct "),
				Fragment::Stop,
				Fragment::Newline,
				Fragment::text("\""),
				Fragment::Stop,
				Fragment::text("\""),
				Fragment::Newline,
				Fragment::Stop,
			]),
		),
	]
}
