//! Key reference shown by the help overlay.

pub const HELP_TEXT: &str = r#"OCRDESK - IMAGE TO TEXT

=== WORKFLOW ===
1. Choose an image (o, Enter, or click the image panel)
2. Check the preview on the left
3. Recognize it (r, or click the button at the bottom left)
4. Copy the recognized text (c, or click Copy)

=== CHOOSING AN IMAGE ===
o / Enter       Open the path prompt
                Type a path; a leading ~ means your home directory
Enter           Load the typed path
Esc             Cancel
                Any file can be chosen; the server decides whether
                it can read it. Files that cannot be previewed are
                still sent as-is.

=== RECOGNITION ===
r               Send the selected image to the server
                The button shows "Processing..." until the server
                answers. Errors are shown in an alert.

=== RESULT ===
c / y           Copy the result to the clipboard
                The button shows "Copied!" for two seconds

=== SERVER ===
h               Check the server's health endpoint
                The header shows the last known status

=== ALERTS ===
Enter/Esc/Space Dismiss the current alert

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

q               Quit"#;

pub fn help_line_count() -> usize {
    HELP_TEXT.lines().count()
}
