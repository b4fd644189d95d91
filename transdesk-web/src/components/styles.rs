pub const APP_STYLES: &str = r#"
:root {
    --bg-primary: #0f172a;
    --bg-secondary: #111827;
    --bg-card: #1e293b;
    --border-color: #334155;
    --text-primary: #f8fafc;
    --text-secondary: #94a3b8;
    --accent-bg: #3b82f6;
    --accent-text: #ffffff;
    --ok: #22c55e;
    --warn: #f59e0b;
    --danger: #ef4444;
}

* {
    box-sizing: border-box;
}

body {
    margin: 0;
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
}

/* Shell */
.app-shell {
    display: flex;
    min-height: 100vh;
}

.app-nav {
    display: flex;
    flex-direction: column;
    gap: 0.25rem;
    width: 13rem;
    padding: 1rem 0.75rem;
    background: var(--bg-secondary);
    border-right: 1px solid var(--border-color);
    flex-shrink: 0;
}

.app-brand {
    font-weight: 700;
    font-size: 1.1rem;
    padding: 0.25rem 0.5rem 1rem;
}

.nav-item {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.5rem 0.65rem;
    border: none;
    border-radius: 0.45rem;
    background: transparent;
    color: var(--text-secondary);
    font-size: 0.9rem;
    text-align: left;
    cursor: pointer;
}

.nav-item:hover {
    background: color-mix(in srgb, var(--bg-card) 70%, transparent);
    color: var(--text-primary);
}

.nav-item.active {
    background: color-mix(in srgb, var(--accent-bg) 25%, var(--bg-card) 75%);
    color: var(--text-primary);
}

.nav-icon {
    width: 1.25rem;
    text-align: center;
}

.app-main {
    flex: 1;
    min-width: 0;
    padding: 1.5rem 2rem;
    overflow-y: auto;
}

/* Page */
.page {
    display: flex;
    flex-direction: column;
    gap: 1rem;
    max-width: 64rem;
}

.page-header {
    display: flex;
    justify-content: space-between;
    align-items: flex-start;
    gap: 1rem;
}

.page-title {
    margin: 0;
    font-size: 1.4rem;
}

.page-subtitle {
    margin: 0.2rem 0 0;
    color: var(--text-secondary);
    font-size: 0.85rem;
}

.page-actions {
    display: flex;
    gap: 0.5rem;
}

.section-title {
    margin: 0 0 0.75rem;
    font-size: 1.05rem;
}

.banner {
    padding: 0.6rem 0.8rem;
    border-radius: 0.45rem;
    font-size: 0.85rem;
}

.banner-error {
    background: color-mix(in srgb, var(--danger) 18%, var(--bg-primary) 82%);
    border: 1px solid color-mix(in srgb, var(--danger) 50%, transparent);
}

.empty {
    padding: 2rem 1rem;
    text-align: center;
    color: var(--text-secondary);
}

.empty-icon {
    font-size: 2rem;
    margin-bottom: 0.5rem;
}

.loading {
    color: var(--text-secondary);
    font-size: 0.85rem;
    padding: 0.5rem 0;
}

/* Forms */
.form-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr));
    gap: 0.75rem;
}

.field {
    display: flex;
    flex-direction: column;
    gap: 0.3rem;
}

.field-label {
    font-size: 0.78rem;
    color: var(--text-secondary);
}

.field-error {
    color: var(--danger);
    font-size: 0.8rem;
}

.input {
    width: 100%;
    padding: 0.45rem 0.6rem;
    border: 1px solid var(--border-color);
    border-radius: 0.4rem;
    background: var(--bg-secondary);
    color: var(--text-primary);
    font-size: 0.88rem;
}

.input:focus {
    outline: none;
    border-color: var(--accent-bg);
}

.input:disabled {
    opacity: 0.6;
}

.input.search {
    max-width: 24rem;
}

textarea.input {
    resize: vertical;
    font-family: ui-monospace, monospace;
}

.filters {
    display: flex;
    flex-wrap: wrap;
    gap: 0.5rem;
    align-items: center;
}

.filters .input {
    width: auto;
}

/* Buttons */
.btn {
    padding: 0.45rem 0.9rem;
    border: 1px solid var(--border-color);
    border-radius: 0.4rem;
    background: var(--bg-card);
    color: var(--text-primary);
    font-size: 0.85rem;
    cursor: pointer;
}

.btn:hover:not(:disabled) {
    background: color-mix(in srgb, var(--bg-card) 80%, var(--accent-bg) 20%);
}

.btn:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.btn-primary {
    background: var(--accent-bg);
    border-color: var(--accent-bg);
    color: var(--accent-text);
}

.btn-primary:hover:not(:disabled) {
    background: color-mix(in srgb, var(--accent-bg) 85%, white 15%);
}

.btn-danger {
    background: var(--danger);
    border-color: var(--danger);
    color: white;
}

.btn-danger-outline {
    color: var(--danger);
    border-color: color-mix(in srgb, var(--danger) 60%, transparent);
}

.btn-small {
    padding: 0.25rem 0.6rem;
    font-size: 0.78rem;
}

.btn-large {
    padding: 0.65rem 1.4rem;
    font-size: 0.95rem;
}

/* Chips & badges */
.chip {
    display: inline-flex;
    align-items: center;
    gap: 0.3rem;
    padding: 0.1rem 0.5rem;
    margin-right: 0.35rem;
    border-radius: 999px;
    background: var(--bg-secondary);
    border: 1px solid var(--border-color);
    font-size: 0.72rem;
    color: var(--text-secondary);
}

.chip-ok {
    color: var(--ok);
    border-color: color-mix(in srgb, var(--ok) 50%, transparent);
}

.color-chip {
    display: inline-block;
    width: 0.6rem;
    height: 0.6rem;
    border-radius: 50%;
}

.color-0 { background: #3b82f6; }
.color-1 { background: #22c55e; }
.color-2 { background: #f59e0b; }
.color-3 { background: #a855f7; }
.color-4 { background: #ec4899; }

.badge {
    display: inline-block;
    padding: 0.12rem 0.5rem;
    border-radius: 999px;
    font-size: 0.72rem;
    font-weight: 600;
}

.badge-pending { background: #334155; color: #cbd5e1; }
.badge-translating { background: #1e3a8a; color: #bfdbfe; }
.badge-completed { background: #14532d; color: #bbf7d0; }
.badge-failed { background: #7f1d1d; color: #fecaca; }
.badge-cancelled { background: #78350f; color: #fde68a; }
.badge-unknown { background: #334155; color: #94a3b8; }

/* Cards */
.card-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr));
    gap: 0.75rem;
}

.card {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    padding: 0.9rem;
    border: 1px solid var(--border-color);
    border-radius: 0.6rem;
    background: var(--bg-card);
}

.card-head {
    display: flex;
    justify-content: space-between;
    align-items: flex-start;
    gap: 0.5rem;
}

.card-title {
    margin: 0;
    font-size: 0.98rem;
}

.card-text {
    margin: 0;
    font-size: 0.82rem;
    color: var(--text-secondary);
}

.card-meta {
    font-size: 0.75rem;
    color: var(--text-secondary);
}

.card-actions {
    display: flex;
    gap: 0.4rem;
    margin-top: auto;
}

/* Tables */
.table {
    width: 100%;
    border-collapse: collapse;
    font-size: 0.85rem;
}

.table th {
    text-align: left;
    padding: 0.5rem;
    color: var(--text-secondary);
    font-weight: 500;
    border-bottom: 1px solid var(--border-color);
}

.table td {
    padding: 0.5rem;
    border-bottom: 1px solid color-mix(in srgb, var(--border-color) 50%, transparent);
}

.table-compact td {
    padding: 0.25rem 0.5rem;
}

.cell-name {
    font-weight: 500;
}

.cell-muted {
    color: var(--text-secondary);
    font-size: 0.8rem;
}

/* Wizard */
.steps {
    display: flex;
    gap: 0.5rem;
    list-style: none;
    margin: 0;
    padding: 0;
}

.step {
    flex: 1;
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.5rem 0.65rem;
    border-radius: 0.45rem;
    background: var(--bg-secondary);
    color: var(--text-secondary);
    font-size: 0.82rem;
}

.step.active {
    background: color-mix(in srgb, var(--accent-bg) 25%, var(--bg-card) 75%);
    color: var(--text-primary);
}

.step.done .step-number {
    background: var(--ok);
    color: #0f172a;
}

.step-number {
    display: inline-flex;
    align-items: center;
    justify-content: center;
    width: 1.4rem;
    height: 1.4rem;
    border-radius: 50%;
    background: var(--border-color);
    font-size: 0.75rem;
    font-weight: 600;
}

.wizard-body {
    padding: 1.25rem;
    border: 1px solid var(--border-color);
    border-radius: 0.6rem;
    background: var(--bg-card);
}

.step-panel {
    display: flex;
    flex-direction: column;
    gap: 0.9rem;
}

.wizard-footer {
    display: flex;
    justify-content: space-between;
}

.dropzone {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 0.4rem;
    padding: 2rem;
    border: 2px dashed var(--border-color);
    border-radius: 0.6rem;
    color: var(--text-secondary);
    cursor: pointer;
}

.dropzone:hover {
    border-color: var(--accent-bg);
}

.dropzone-icon {
    font-size: 1.6rem;
}

.file-input {
    display: none;
}

.file-card {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    padding: 0.75rem;
    border: 1px solid var(--border-color);
    border-radius: 0.5rem;
    background: var(--bg-secondary);
}

.file-icon {
    font-size: 1.5rem;
}

.file-info {
    flex: 1;
    min-width: 0;
}

.file-name {
    font-weight: 500;
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
}

.file-meta {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    font-size: 0.78rem;
    color: var(--text-secondary);
}

.mode-options {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    gap: 0.5rem;
}

.mode-option {
    display: flex;
    gap: 0.5rem;
    padding: 0.7rem;
    border: 1px solid var(--border-color);
    border-radius: 0.5rem;
    cursor: pointer;
}

.mode-option.active {
    border-color: var(--accent-bg);
    background: color-mix(in srgb, var(--accent-bg) 12%, transparent);
}

.mode-title {
    font-weight: 500;
    font-size: 0.88rem;
}

.mode-hint {
    font-size: 0.75rem;
    color: var(--text-secondary);
}

.selection-summary {
    font-size: 0.8rem;
    color: var(--text-secondary);
}

.glossary-picker {
    display: flex;
    flex-direction: column;
    gap: 0.35rem;
}

.picker-item {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.55rem 0.7rem;
    border: 1px solid var(--border-color);
    border-radius: 0.45rem;
    background: var(--bg-secondary);
    color: var(--text-primary);
    text-align: left;
    cursor: pointer;
}

.picker-item.selected {
    border-color: var(--accent-bg);
}

.picker-item:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.picker-name {
    flex: 1;
}

.picker-meta {
    font-size: 0.75rem;
    color: var(--text-secondary);
}

.summary-row {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 0.6rem 0;
    border-bottom: 1px solid color-mix(in srgb, var(--border-color) 50%, transparent);
}

.summary-label {
    font-size: 0.75rem;
    color: var(--text-secondary);
    margin-bottom: 0.2rem;
}

.summary-value {
    font-size: 0.9rem;
}

.execute-summary {
    color: var(--text-secondary);
    font-size: 0.85rem;
}

.execute-state {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 0.75rem;
    padding: 1.5rem 0;
    text-align: center;
}

.execute-state.success .execute-icon { color: var(--ok); }
.execute-state.error .execute-icon { color: var(--danger); }

.execute-icon {
    font-size: 2rem;
}

.execute-error {
    color: var(--danger);
    font-size: 0.85rem;
}

.execute-actions {
    display: flex;
    gap: 0.5rem;
}

.progress {
    width: 100%;
    max-width: 28rem;
    height: 0.6rem;
    border-radius: 999px;
    background: var(--bg-secondary);
    overflow: hidden;
}

.progress-fill {
    height: 100%;
    background: var(--accent-bg);
    transition: width 0.3s ease;
}

.progress-label {
    font-size: 0.8rem;
    color: var(--text-secondary);
}

/* Glossary editor */
.term-add,
.term-toolbar,
.term-import-actions {
    display: flex;
    gap: 0.5rem;
    align-items: center;
}

.term-import {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
}

.term-counts {
    margin-left: auto;
    font-size: 0.78rem;
    color: var(--text-secondary);
    white-space: nowrap;
}

.term-list {
    display: flex;
    flex-direction: column;
    gap: 0.3rem;
    max-height: 20rem;
    overflow-y: auto;
}

.term-row {
    display: flex;
    align-items: center;
    gap: 0.4rem;
    padding: 0.2rem 0.35rem;
    border-left: 3px solid transparent;
    border-radius: 0.3rem;
}

.term-row.new { border-left-color: var(--ok); }
.term-row.edited { border-left-color: var(--warn); }

.term-row.deleted {
    border-left-color: var(--danger);
    opacity: 0.55;
}

.term-row.deleted .input {
    text-decoration: line-through;
}

.term-row.duplicate .input {
    border-color: var(--danger);
}

.term-check {
    flex: none;
    display: flex;
    align-items: center;
    gap: 0.3rem;
    font-size: 0.78rem;
    color: var(--text-secondary);
}

.term-arrow {
    color: var(--text-secondary);
}

.term-preview {
    display: flex;
    flex-direction: column;
    gap: 0.4rem;
}

/* Modal */
.modal-backdrop {
    position: fixed;
    inset: 0;
    display: flex;
    align-items: center;
    justify-content: center;
    background: rgba(2, 6, 23, 0.7);
    z-index: 50;
}

.modal {
    display: flex;
    flex-direction: column;
    gap: 0.8rem;
    width: min(40rem, 94vw);
    max-height: 90vh;
    overflow-y: auto;
    padding: 1.25rem;
    border: 1px solid var(--border-color);
    border-radius: 0.7rem;
    background: var(--bg-card);
}

.modal-small {
    width: min(26rem, 94vw);
}

.modal-wide {
    width: min(52rem, 96vw);
}

.modal-title {
    margin: 0;
    font-size: 1.05rem;
}

.modal-message {
    margin: 0;
    color: var(--text-secondary);
    font-size: 0.88rem;
}

.modal-details {
    margin: 0;
    padding-left: 1.2rem;
    font-size: 0.82rem;
}

.modal-actions {
    display: flex;
    justify-content: flex-end;
    gap: 0.5rem;
}

/* Toasts */
.toast-stack {
    position: fixed;
    right: 1rem;
    bottom: 1rem;
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    z-index: 100;
}

.toast {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    min-width: 16rem;
    max-width: 24rem;
    padding: 0.6rem 0.8rem;
    border-radius: 0.5rem;
    background: var(--bg-card);
    border: 1px solid var(--border-color);
    font-size: 0.85rem;
    box-shadow: 0 8px 20px rgba(0, 0, 0, 0.35);
}

.toast span {
    flex: 1;
}

.toast-success { border-left: 4px solid var(--ok); }
.toast-error { border-left: 4px solid var(--danger); }
.toast-info { border-left: 4px solid var(--accent-bg); }

.toast-close {
    border: none;
    background: transparent;
    color: var(--text-secondary);
    font-size: 1rem;
    cursor: pointer;
}
"#;
