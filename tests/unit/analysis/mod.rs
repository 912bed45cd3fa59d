mod transparency;
