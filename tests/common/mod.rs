// Shared fixtures for collective-migrate integration tests
#![allow(dead_code)]

use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const EDIT_PROFILE: &str = indoc! {r#"
    @extends('layouts.app')

    @section('content')
        {!! Form::model($user, ['route' => ['profile.update', $user->id], 'method' => 'PUT', 'files' => true]) !!}
            {!! Form::label('first_name') !!}
            {!! Form::text('first_name', $user->first_name, ['class' => 'form-control']) !!}
            {!! Form::email('email', null, ['required']) !!}
            {!! Form::select('country', $countries, $user->country_id) !!}
            {!! Form::checkbox('newsletter', 1, $user->newsletter) !!}
            {!! Form::assignSelectVariant($variant) !!}
            {!! Form::submit('Save', ['class' => 'btn btn-primary']) !!}
        {!! Form::close() !!}
    @endsection
"#};

pub const LAYOUT: &str = indoc! {r#"
    <head>
        {!! Html::style('css/app.css') !!}
        {!! Html::script('js/app.js', ['defer']) !!}
    </head>
    <body>
        {!! Html::link('/about', 'About us') !!}
        @yield('content')
    </body>
"#};

pub const PLAIN: &str = "<p>{{ $message }}</p>\n";

/// Write `content` to `dir/relative`, creating parent directories.
pub fn write_fixture(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// A small views tree with form, markup, plain and helper files.
pub fn views_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "profile/edit.blade.php", EDIT_PROFILE);
    write_fixture(dir.path(), "layouts/app.blade.php", LAYOUT);
    write_fixture(dir.path(), "welcome.blade.php", PLAIN);
    write_fixture(
        dir.path(),
        "partials/legacy.php",
        "<?php echo '{!! Form::close() !!}'; ?>\n",
    );
    write_fixture(dir.path(), "Support/Helper.php", "<?php class Helper {}\n");
    write_fixture(
        dir.path(),
        "vendor/package/widget.blade.php",
        "{!! Form::close() !!}\n",
    );
    dir
}

pub fn read(dir: &Path, relative: &str) -> String {
    fs::read_to_string(dir.join(relative)).unwrap()
}
